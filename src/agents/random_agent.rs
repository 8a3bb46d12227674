//! Random agent, picks a legal action uniformly at random.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::actions::Action;
use crate::agents::Agent;
use crate::game_state::Quoridor;

/// An agent that selects a random legal action.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible agent for tests and seeded self-play runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, game: &Quoridor, player: u8) -> anyhow::Result<Action> {
        let actions = game.legal_actions(player)?;
        actions
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No legal actions for player {}", player))
    }
}
