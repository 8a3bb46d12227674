//! Self-play executable.
//!
//! Plays a batch of games between two configured agents in parallel and
//! prints a per-game summary followed by the win table.

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use quoridor_engine::agents::build_agent;
use quoridor_engine::game_runner::{play_game, GameResult};
use quoridor_engine::render::render;
use quoridor_engine::selfplay_config::{load_config, SelfPlayConfig, SelfPlayWorkerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "quoridor-selfplay",
    about = "Play Quoridor games between automatic agents",
    version
)]
struct Args {
    /// YAML config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Number of games to play
    #[arg(long)]
    num_games: Option<usize>,

    /// Maximum turns before a game is stopped without a winner
    #[arg(long)]
    max_steps: Option<usize>,

    /// Base seed for the random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final board of every game
    #[arg(long, default_value_t = false)]
    show_board: bool,
}

const DEFAULT_NUM_GAMES: usize = 10;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SelfPlayConfig::default(),
    };
    if let Some(max_steps) = args.max_steps {
        config.quoridor.max_steps = max_steps;
    }
    config.validate()?;

    let worker = config.self_play.clone().unwrap_or_default();
    let num_games = args.num_games.or(worker.num_games).unwrap_or(DEFAULT_NUM_GAMES);
    let seed = args.seed.or(worker.seed);

    println!("=== Quoridor Self-Play ===");
    println!("  Agents: {:?} vs {:?}", worker.agents[0], worker.agents[1]);
    println!("  Games: {}", num_games);
    println!("  Walls per player: {}", config.quoridor.walls_per_player);
    println!("  Max steps: {}", config.quoridor.max_steps);

    let results = run_games(&config, &worker, num_games, seed)?;

    for (i, result) in results.iter().enumerate() {
        match &result.winner_name {
            Some(name) => println!("Game {}: {} won in {} turns", i + 1, name, result.num_turns),
            None => println!("Game {}: truncated after {} turns", i + 1, result.num_turns),
        }
        if args.show_board {
            println!("{}", render(&result.final_state));
        }
    }

    print_summary(&results);
    Ok(())
}

/// Play `num_games` games on a rayon pool sized by the config.
fn run_games(
    config: &SelfPlayConfig,
    worker: &SelfPlayWorkerConfig,
    num_games: usize,
    seed: Option<u64>,
) -> Result<Vec<GameResult>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = worker.num_threads {
        builder = builder.num_threads(num_threads);
    }
    let pool = builder.build().context("Failed to build self-play thread pool")?;

    pool.install(|| {
        (0..num_games)
            .into_par_iter()
            .map(|i| {
                // Distinct seeds per game and per seat
                let game_seed = seed.map(|s| s.wrapping_add(2 * i as u64));
                let mut player1 = build_agent(worker.agents[0], game_seed);
                let mut player2 = build_agent(worker.agents[1], game_seed.map(|s| s.wrapping_add(1)));
                play_game(player1.as_mut(), player2.as_mut(), &config.quoridor)
                    .with_context(|| format!("Game {} failed", i + 1))
            })
            .collect()
    })
}

fn print_summary(results: &[GameResult]) {
    let wins = |player: u8| results.iter().filter(|r| r.winner == Some(player)).count();
    let truncated = results.iter().filter(|r| r.winner.is_none()).count();
    let total_turns: usize = results.iter().map(|r| r.num_turns).sum();

    println!("\n=== Summary ===");
    println!("  Player 1 wins: {}", wins(1));
    println!("  Player 2 wins: {}", wins(2));
    println!("  Truncated:     {}", truncated);
    if !results.is_empty() {
        println!(
            "  Average turns: {:.1}",
            total_turns as f64 / results.len() as f64
        );
    }
}
