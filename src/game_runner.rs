//! Core game loop for self-play.
//!
//! Agents are abstracted behind the [`Agent`] trait so the runner can be
//! tested with scripted agents.

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::agents::Agent;
use crate::game_state::{GameState, PlayerRecord, PlayerSetup, Quoridor};
use crate::selfplay_config::QuoridorConfig;

/// One applied turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: u8,
    pub action: Action,
}

/// Result of a complete game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// `Some(player)` if that player won, `None` if truncated.
    pub winner: Option<u8>,
    pub winner_name: Option<String>,
    /// Total number of turns played.
    pub num_turns: usize,
    pub history: Vec<TurnRecord>,
    pub final_state: GameState,
}

/// Play a complete game between two agents.
///
/// Player 1 moves first. Every action goes through [`Quoridor::apply`], so an
/// agent proposing an illegal action ends the game with an error. The game is
/// truncated after `config.max_steps` turns.
pub fn play_game<'a>(
    player1: &'a mut dyn Agent,
    player2: &'a mut dyn Agent,
    config: &QuoridorConfig,
) -> anyhow::Result<GameResult> {
    let players = [
        PlayerRecord::starting(format!("{}-1", player1.name()), 1, config.walls_per_player),
        PlayerRecord::starting(format!("{}-2", player2.name()), 2, config.walls_per_player),
    ];
    let mut game = Quoridor::new(PlayerSetup::ByRecords(players))?;
    let mut agents = [player1, player2];

    let mut history: Vec<TurnRecord> = Vec::new();
    let mut current_player: u8 = 1;

    while history.len() < config.max_steps {
        let agent = &mut agents[current_player as usize - 1];
        let action = agent.select_action(&game, current_player)?;
        game.apply(current_player, action).with_context(|| {
            format!(
                "Agent {} proposed an illegal action for player {}: {:?}",
                agent.name(),
                current_player,
                action
            )
        })?;
        debug!("turn {}: player {} {:?}", history.len() + 1, current_player, action);
        history.push(TurnRecord {
            player: current_player,
            action,
        });

        if game.is_over() {
            break;
        }

        // Alternate players
        current_player = 3 - current_player;
    }

    let winner = game.winner_number();
    let winner_name = game.winner().map(str::to_string);
    match &winner_name {
        Some(name) => info!("{} won after {} turns", name, history.len()),
        None => info!("game truncated after {} turns", history.len()),
    }

    Ok(GameResult {
        winner,
        winner_name,
        num_turns: history.len(),
        history,
        final_state: game.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{HeuristicAgent, RandomAgent};
    use crate::grid::Cell;

    /// A mock agent that always picks the first legal action.
    struct FirstLegalAgent;

    impl Agent for FirstLegalAgent {
        fn name(&self) -> &str {
            "first"
        }

        fn select_action(&mut self, game: &Quoridor, player: u8) -> anyhow::Result<Action> {
            Ok(game.legal_actions(player)?[0])
        }
    }

    /// A mock agent that always tries the same cell.
    struct StubbornAgent;

    impl Agent for StubbornAgent {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn select_action(&mut self, _game: &Quoridor, _player: u8) -> anyhow::Result<Action> {
            Ok(Action::MoveToken(Cell::new(1, 1)))
        }
    }

    fn config(walls_per_player: u8, max_steps: usize) -> QuoridorConfig {
        QuoridorConfig {
            walls_per_player,
            max_steps,
        }
    }

    #[test]
    fn test_heuristic_race_without_walls() {
        let result =
            play_game(&mut HeuristicAgent::new(), &mut HeuristicAgent::new(), &config(0, 100)).unwrap();

        // Both run straight up column 5; player 2 jumps over player 1 and
        // arrives first
        assert_eq!(result.winner, Some(2));
        assert_eq!(result.winner_name.as_deref(), Some("heuristic-2"));
        assert_eq!(result.num_turns, 14);
        assert_eq!(
            result.history[7],
            TurnRecord {
                player: 2,
                action: Action::MoveToken(Cell::new(5, 4))
            }
        );
        assert_eq!(result.final_state.players[1].position, Cell::new(5, 1));
    }

    #[test]
    fn test_play_game_alternating_players() {
        let result =
            play_game(&mut FirstLegalAgent, &mut HeuristicAgent::new(), &config(3, 40)).unwrap();

        for (i, turn) in result.history.iter().enumerate() {
            assert_eq!(turn.player, (i % 2) as u8 + 1);
        }
    }

    #[test]
    fn test_play_game_truncation() {
        let result =
            play_game(&mut HeuristicAgent::new(), &mut HeuristicAgent::new(), &config(10, 4)).unwrap();

        assert_eq!(result.winner, None);
        assert_eq!(result.winner_name, None);
        assert_eq!(result.num_turns, 4);
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn test_random_games_stay_legal() {
        for seed in 0..4 {
            let result = play_game(
                &mut RandomAgent::seeded(seed),
                &mut RandomAgent::seeded(seed + 100),
                &config(10, 60),
            )
            .unwrap();

            assert!(result.num_turns <= 60);
            let walls_used = result.final_state.walls.len();
            let in_hand: usize = result
                .final_state
                .players
                .iter()
                .map(|p| p.walls as usize)
                .sum();
            assert_eq!(walls_used + in_hand, 20);
        }
    }

    #[test]
    fn test_illegal_action_is_an_error() {
        let result = play_game(&mut StubbornAgent, &mut HeuristicAgent::new(), &config(10, 10));
        assert!(result.is_err());
    }
}
