//! Agent that plays the shortest-path heuristic.

use anyhow::Context;

use crate::actions::Action;
use crate::agents::Agent;
use crate::game_state::Quoridor;

/// Advances along the shortest route and walls off a close opponent.
#[derive(Debug, Default, Clone)]
pub struct HeuristicAgent;

impl HeuristicAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn select_action(&mut self, game: &Quoridor, player: u8) -> anyhow::Result<Action> {
        game.decide_turn(player)
            .with_context(|| format!("Heuristic found no action for player {}", player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::PlayerSetup;
    use crate::grid::Cell;

    #[test]
    fn test_heuristic_agent_matches_auto_turn() {
        let game = Quoridor::new(PlayerSetup::by_names("alice", "bob")).unwrap();
        let mut agent = HeuristicAgent::new();

        let action = agent.select_action(&game, 1).unwrap();
        assert_eq!(action, Action::MoveToken(Cell::new(5, 2)));

        let mut copy = game.clone();
        let outcome = copy.auto_turn(1).unwrap();
        assert_eq!(Action::from(outcome), action);
    }

    #[test]
    fn test_heuristic_agent_reports_bad_player() {
        let game = Quoridor::new(PlayerSetup::by_names("alice", "bob")).unwrap();
        let mut agent = HeuristicAgent::new();

        assert!(agent.select_action(&game, 0).is_err());
    }
}
