use serde::{Deserialize, Serialize};

use crate::error::RuleResult;
use crate::game_state::Quoridor;
use crate::grid::{Cell, Wall};
use crate::validation::{player_index, validate_wall};

/// A single turn: move the token or place a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveToken(Cell),
    PlaceWall(Wall),
}

impl Quoridor {
    /// Get all cells `player` can move their token to this turn.
    pub fn legal_moves(&self, player: u8) -> RuleResult<Vec<Cell>> {
        let index = player_index(player)?;
        let position = self.state().players[index].position;
        Ok(self.graph().cell_successors(position))
    }

    /// Get all walls `player` can place this turn, in [`Wall::candidates`]
    /// order. Empty once the player's hand is empty.
    pub fn legal_walls(&self, player: u8) -> RuleResult<Vec<Wall>> {
        let index = player_index(player)?;
        if self.state().players[index].walls == 0 {
            return Ok(Vec::new());
        }
        Ok(Wall::candidates()
            .filter(|&wall| validate_wall(self.state(), player, wall).is_ok())
            .collect())
    }

    /// Token moves first, then wall placements.
    pub fn legal_actions(&self, player: u8) -> RuleResult<Vec<Action>> {
        let moves = self.legal_moves(player)?.into_iter().map(Action::MoveToken);
        let walls = self.legal_walls(player)?.into_iter().map(Action::PlaceWall);
        Ok(moves.chain(walls).collect())
    }

    /// Apply an action through the matching validated entry point.
    pub fn apply(&mut self, player: u8, action: Action) -> RuleResult<()> {
        match action {
            Action::MoveToken(destination) => self.move_token(player, destination),
            Action::PlaceWall(wall) => self.place_wall(player, wall.anchor, wall.orientation),
        }
    }
}
