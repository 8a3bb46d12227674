//! Rule checks for token moves and wall placements.
//!
//! Validators only read the game state; they report the first violated rule
//! and leave applying the action to the caller.

use crate::error::{RuleResult, RuleViolation};
use crate::game_state::{GameState, WallLists};
use crate::graph::BoardGraph;
use crate::grid::{goal_node, Cell, Wall};
use crate::pathfinding::has_path;

/// Map a player number (1 or 2) to its slot in the player array.
pub fn player_index(player: u8) -> RuleResult<usize> {
    match player {
        1 | 2 => Ok(player as usize - 1),
        _ => Err(RuleViolation::InvalidPlayer(player)),
    }
}

/// Validate whether `player` may move their token to `destination`.
///
/// The destination has to be exactly one of the successors of the player's
/// cell in the freshly built move graph.
pub fn validate_move(state: &GameState, player: u8, destination: Cell) -> RuleResult<()> {
    let index = player_index(player)?;
    if !destination.is_on_board() {
        return Err(RuleViolation::OutOfBounds(destination));
    }

    let graph = state.graph();
    let matches = graph
        .cell_successors(state.players[index].position)
        .into_iter()
        .filter(|&cell| cell == destination)
        .count();

    if matches == 1 {
        Ok(())
    } else {
        Err(RuleViolation::InvalidMove {
            player,
            destination,
        })
    }
}

/// Validate whether `player` may place `wall`.
///
/// Checks, in order: player number, anchor bounds, wall budget, overlap with
/// a parallel wall, crossing a perpendicular wall, and that both players keep
/// a route to their goal.
pub fn validate_wall(state: &GameState, player: u8, wall: Wall) -> RuleResult<()> {
    let index = player_index(player)?;
    check_wall_bounds(wall)?;
    if state.players[index].walls == 0 {
        return Err(RuleViolation::NoWallsRemaining(player));
    }
    check_wall_free(&state.walls, wall)?;
    check_paths_remain(state.positions(), &state.walls, wall)
}

pub(crate) fn check_wall_bounds(wall: Wall) -> RuleResult<()> {
    if wall.is_in_bounds() {
        Ok(())
    } else {
        Err(RuleViolation::OutOfBounds(wall.anchor))
    }
}

/// Check that `wall` neither overlaps nor crosses an already placed wall.
pub(crate) fn check_wall_free(walls: &WallLists, wall: Wall) -> RuleResult<()> {
    let parallel = walls.anchors(wall.orientation);
    if wall
        .overlapping_anchors()
        .iter()
        .any(|anchor| parallel.contains(anchor))
    {
        return Err(RuleViolation::WallOverlap(wall));
    }

    let crossing = wall.crossing();
    if walls.anchors(crossing.orientation).contains(&crossing.anchor) {
        return Err(RuleViolation::WallCrossing(wall));
    }

    Ok(())
}

/// Check that both players can still reach their goal once `wall` is placed.
pub(crate) fn check_paths_remain(
    positions: [Cell; 2],
    walls: &WallLists,
    wall: Wall,
) -> RuleResult<()> {
    let with_wall = walls.with(wall);
    let graph = BoardGraph::build(positions, &with_wall.horizontal, &with_wall.vertical);

    for (index, &position) in positions.iter().enumerate() {
        if !has_path(&graph, position, goal_node(index as u8 + 1)) {
            return Err(RuleViolation::WallBlocksPath(wall));
        }
    }
    Ok(())
}
