//! Shortest-path auto-player.
//!
//! The player advances along their shortest route unless the opponent is
//! close to winning and a wall is still in hand. In that case the first
//! vertical wall that passes validation and lengthens the opponent's route
//! is placed. With no such wall the player advances anyway.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::error::{RuleResult, RuleViolation};
use crate::game_state::Quoridor;
use crate::graph::BoardGraph;
use crate::grid::{goal_node, Cell, Orientation, Wall};
use crate::pathfinding::{distance_to_goal, shortest_path};
use crate::validation::{player_index, validate_wall};

/// Opponent routes at least this long do not justify spending a wall.
///
/// Measured in graph edges to the goal node, so the final edge onto the goal
/// node counts as one.
pub const DEFENSE_THRESHOLD: usize = 4;

/// What an automatic turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    MovedToken(Cell),
    PlacedWall(Orientation, Cell),
}

impl From<Action> for TurnOutcome {
    fn from(action: Action) -> Self {
        match action {
            Action::MoveToken(cell) => TurnOutcome::MovedToken(cell),
            Action::PlaceWall(wall) => TurnOutcome::PlacedWall(wall.orientation, wall.anchor),
        }
    }
}

impl From<TurnOutcome> for Action {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::MovedToken(cell) => Action::MoveToken(cell),
            TurnOutcome::PlacedWall(orientation, anchor) => {
                Action::PlaceWall(Wall::new(anchor, orientation))
            }
        }
    }
}

/// Edges from a cell to its goal node along a route of `moves` token moves.
fn goal_edges(moves: usize) -> usize {
    moves + 1
}

impl Quoridor {
    /// Choose the heuristic action for `player` without applying it.
    pub fn decide_turn(&self, player: u8) -> RuleResult<Action> {
        let index = player_index(player)?;
        if self.is_over() {
            return Err(RuleViolation::GameOver);
        }

        let opponent = 3 - player;
        let graph = self.graph();
        let positions = self.state().positions();
        let opponent_distance = distance_to_goal(&graph, positions[1 - index], goal_node(opponent));

        let under_threat = opponent_distance.is_some_and(|d| goal_edges(d) < DEFENSE_THRESHOLD);
        if self.state().players[index].walls > 0 && under_threat {
            if let Some(wall) = self.defensive_wall(player, opponent_distance.unwrap_or(0)) {
                debug!("player {} defends with a {}", player, wall);
                return Ok(Action::PlaceWall(wall));
            }
            warn!(
                "player {} found no wall that slows player {}, advancing instead",
                player, opponent
            );
        }

        self.advance(&graph, player).map(Action::MoveToken)
    }

    /// Play one heuristic turn for `player` and report what was done.
    pub fn auto_turn(&mut self, player: u8) -> RuleResult<TurnOutcome> {
        let action = self.decide_turn(player)?;
        self.apply(player, action)?;
        Ok(action.into())
    }

    /// Next cell on `player`'s shortest route, or their first legal move if
    /// no route exists.
    fn advance(&self, graph: &BoardGraph, player: u8) -> RuleResult<Cell> {
        let index = player_index(player)?;
        let position = self.state().players[index].position;

        if let Some(&next) = shortest_path(graph, position, goal_node(player))
            .as_deref()
            .and_then(|path| path.first())
        {
            return Ok(next);
        }

        graph
            .cell_successors(position)
            .first()
            .copied()
            .ok_or(RuleViolation::NoLegalMove(player))
    }

    /// First legal vertical wall, in [`Wall::vertical_candidates`] order, that
    /// makes the opponent's shortest route longer than `current_distance`.
    fn defensive_wall(&self, player: u8, current_distance: usize) -> Option<Wall> {
        let opponent = 3 - player;
        let state = self.state();
        let positions = state.positions();
        let target = positions[opponent as usize - 1];

        Wall::vertical_candidates()
            .filter(|&wall| validate_wall(state, player, wall).is_ok())
            .find(|&wall| {
                let walls = state.walls.with(wall);
                let graph = BoardGraph::build(positions, &walls.horizontal, &walls.vertical);
                distance_to_goal(&graph, target, goal_node(opponent))
                    .is_some_and(|d| d > current_distance)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::{PlayerRecord, PlayerSetup, WallLists};

    fn game_with(p1: (i32, i32), p1_walls: u8, p2: (i32, i32), p2_walls: u8) -> Quoridor {
        let players = [
            PlayerRecord {
                name: "alice".to_string(),
                walls: p1_walls,
                position: p1.into(),
            },
            PlayerRecord {
                name: "bob".to_string(),
                walls: p2_walls,
                position: p2.into(),
            },
        ];
        Quoridor::new(PlayerSetup::ByRecords(players)).unwrap()
    }

    #[test]
    fn test_advances_from_start() {
        let mut game = Quoridor::new(PlayerSetup::by_names("alice", "bob")).unwrap();

        assert_eq!(game.auto_turn(1), Ok(TurnOutcome::MovedToken(Cell::new(5, 2))));
        assert_eq!(game.auto_turn(2), Ok(TurnOutcome::MovedToken(Cell::new(5, 8))));
        assert_eq!(game.state().positions(), [Cell::new(5, 2), Cell::new(5, 8)]);
    }

    /// Alice far from danger, Bob south of the board center with a
    /// horizontal wall already covering columns 4 and 5 above row 1.
    fn walled_game(p2: (i32, i32)) -> Quoridor {
        let players = [
            PlayerRecord {
                name: "alice".to_string(),
                walls: 10,
                position: Cell::new(1, 8),
            },
            PlayerRecord {
                name: "bob".to_string(),
                walls: 9,
                position: p2.into(),
            },
        ];
        let walls = WallLists {
            horizontal: vec![Cell::new(4, 2)],
            vertical: vec![],
        };
        Quoridor::with_walls(PlayerSetup::ByRecords(players), walls).unwrap()
    }

    #[test]
    fn test_defends_when_opponent_is_close() {
        // Bob goes round the wall through (6, 2): two moves, three edges
        let mut game = walled_game((5, 2));

        let outcome = game.auto_turn(1).unwrap();
        // V(5, 1) would cross the existing wall, V(6, 1) closes the detour
        assert_eq!(outcome, TurnOutcome::PlacedWall(Orientation::Vertical, Cell::new(6, 1)));
        assert_eq!(game.player(1).unwrap().walls, 9);
        assert_eq!(game.state().walls.vertical, vec![Cell::new(6, 1)]);

        let distance = distance_to_goal(&game.graph(), Cell::new(5, 2), goal_node(2));
        assert_eq!(distance, Some(3));
    }

    #[test]
    fn test_no_defense_at_threshold() {
        // Three moves are four edges to the goal node, not close enough
        let mut game = walled_game((5, 3));
        assert_eq!(game.auto_turn(1), Ok(TurnOutcome::MovedToken(Cell::new(1, 9))));

        let mut game = game_with((1, 8), 10, (5, 4), 10);
        assert_eq!(
            distance_to_goal(&game.graph(), Cell::new(5, 4), goal_node(2)),
            Some(3)
        );
        assert_eq!(game.auto_turn(1), Ok(TurnOutcome::MovedToken(Cell::new(1, 9))));
        assert!(game.state().walls.is_empty());
    }

    #[test]
    fn test_advances_when_no_vertical_wall_helps() {
        // Bob runs straight south, only a horizontal wall could slow him
        let mut game = game_with((1, 8), 10, (5, 3), 10);

        assert_eq!(game.auto_turn(1), Ok(TurnOutcome::MovedToken(Cell::new(1, 9))));
        assert!(game.state().walls.is_empty());
        assert_eq!(game.player(1).unwrap().walls, 10);
    }

    #[test]
    fn test_advances_without_walls() {
        let mut game = game_with((1, 5), 0, (5, 3), 10);

        assert_eq!(game.auto_turn(1), Ok(TurnOutcome::MovedToken(Cell::new(1, 6))));
        assert!(game.state().walls.is_empty());
    }

    #[test]
    fn test_advances_when_opponent_is_far() {
        let mut game = game_with((5, 5), 10, (5, 7), 10);

        // Bob needs six steps, no reason to spend a wall
        assert_eq!(game.auto_turn(1), Ok(TurnOutcome::MovedToken(Cell::new(5, 6))));
    }

    #[test]
    fn test_decide_turn_does_not_mutate() {
        let game = walled_game((5, 2));
        let before = game.snapshot();

        let action = game.decide_turn(1).unwrap();
        assert_eq!(action, Action::PlaceWall(Wall::vertical(6, 1)));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_auto_turn_after_game_over() {
        let mut game = game_with((3, 9), 10, (5, 5), 10);

        assert_eq!(game.auto_turn(2), Err(RuleViolation::GameOver));
        assert_eq!(game.auto_turn(5), Err(RuleViolation::InvalidPlayer(5)));
    }

    #[test]
    fn test_outcome_action_conversion() {
        let outcome = TurnOutcome::PlacedWall(Orientation::Vertical, Cell::new(3, 4));
        let action = Action::from(outcome);
        assert_eq!(action, Action::PlaceWall(Wall::vertical(3, 4)));
        assert_eq!(TurnOutcome::from(action), outcome);
    }
}
