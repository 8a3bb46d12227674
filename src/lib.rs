//! Rules engine for two-player Quoridor.
//!
//! [`Quoridor`] owns the game state. Every query rebuilds the move graph from
//! the player positions and wall lists, and every mutation is validated
//! against that graph before it is applied.

pub mod actions;
pub mod agents;
pub mod error;
pub mod game_runner;
pub mod game_state;
pub mod graph;
pub mod grid;
pub mod heuristic;
pub mod pathfinding;
pub mod render;
pub mod selfplay_config;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use actions::Action;
pub use error::{RuleResult, RuleViolation};
pub use game_state::{GameState, PlayerRecord, PlayerSetup, Quoridor, WallLists};
pub use grid::{Cell, Node, Orientation, Wall};
pub use heuristic::TurnOutcome;
pub use render::render;
