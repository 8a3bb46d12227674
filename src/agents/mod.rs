//! Agents that choose a turn for one player.
//!
//! All agents implement the [`Agent`] trait and are driven by
//! [`crate::game_runner::play_game`].

use crate::actions::Action;
use crate::game_state::Quoridor;
use crate::selfplay_config::AgentKind;

pub mod heuristic_agent;
pub mod random_agent;

pub use heuristic_agent::HeuristicAgent;
pub use random_agent::RandomAgent;

/// Trait for agents that select an action given the current game.
pub trait Agent {
    /// Short name used in logs and summaries.
    fn name(&self) -> &str;

    /// Select an action for `player`. The game is not modified; the caller
    /// applies the returned action.
    fn select_action(&mut self, game: &Quoridor, player: u8) -> anyhow::Result<Action>;
}

/// Build a boxed agent of the configured kind.
///
/// `seed` only affects agents that use randomness; `None` seeds from entropy.
pub fn build_agent(kind: AgentKind, seed: Option<u64>) -> Box<dyn Agent + Send> {
    match kind {
        AgentKind::Heuristic => Box::new(HeuristicAgent::new()),
        AgentKind::Random => match seed {
            Some(seed) => Box::new(RandomAgent::seeded(seed)),
            None => Box::new(RandomAgent::new()),
        },
    }
}
