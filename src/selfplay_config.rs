//! Configuration for self-play sessions.
//!
//! Parsed from YAML. Sections other than `quoridor` and `self_play` are
//! ignored so the same file can carry settings for other tools.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::grid::MAX_WALLS;

/// Top-level config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Game parameters.
    #[serde(default)]
    pub quoridor: QuoridorConfig,

    /// Self-play session parameters (optional, the CLI has defaults).
    #[serde(default)]
    pub self_play: Option<SelfPlayWorkerConfig>,
}

/// Game parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoridorConfig {
    #[serde(default = "default_walls_per_player")]
    pub walls_per_player: u8,
    /// Turns after which a game is stopped without a winner.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for QuoridorConfig {
    fn default() -> Self {
        Self {
            walls_per_player: default_walls_per_player(),
            max_steps: default_max_steps(),
        }
    }
}

fn default_walls_per_player() -> u8 {
    MAX_WALLS
}

fn default_max_steps() -> usize {
    200
}

/// Which agent plays a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Heuristic,
    Random,
}

/// Self-play session parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayWorkerConfig {
    #[serde(default)]
    pub num_games: Option<usize>,
    /// Size of the worker pool; rayon's default when unset.
    #[serde(default)]
    pub num_threads: Option<usize>,
    /// Base seed, game `i` seeds its two seats with `seed + 2i` and
    /// `seed + 2i + 1`.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_agents")]
    pub agents: [AgentKind; 2],
}

impl Default for SelfPlayWorkerConfig {
    fn default() -> Self {
        Self {
            num_games: None,
            num_threads: None,
            seed: None,
            agents: default_agents(),
        }
    }
}

fn default_agents() -> [AgentKind; 2] {
    [AgentKind::Heuristic, AgentKind::Heuristic]
}

impl SelfPlayConfig {
    /// Reject values the engine cannot play with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.quoridor.walls_per_player <= MAX_WALLS,
            "walls_per_player must be at most {}, got {}",
            MAX_WALLS,
            self.quoridor.walls_per_player
        );
        ensure!(self.quoridor.max_steps > 0, "max_steps must be positive");
        if let Some(self_play) = &self.self_play {
            ensure!(
                self_play.num_threads != Some(0),
                "num_threads must be positive when set"
            );
        }
        Ok(())
    }
}

/// Load and validate a `SelfPlayConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SelfPlayConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: SelfPlayConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
    Ok(config)
}
