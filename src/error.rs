use thiserror::Error;

use crate::grid::{Cell, Wall};

/// Every way a request can break the rules of the game.
///
/// Engine operations check before they mutate, so a returned violation always
/// means the game state is exactly what it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("invalid player number {0}, expected 1 or 2")]
    InvalidPlayer(u8),

    #[error("invalid wall orientation {0:?}, expected \"horizontal\" or \"vertical\"")]
    InvalidOrientation(String),

    #[error("malformed coordinate {0:?}, expected two integers")]
    InvalidCoordinateShape(String),

    #[error("position {0} is outside the board")]
    OutOfBounds(Cell),

    #[error("player {0} has no walls remaining")]
    NoWallsRemaining(u8),

    #[error("player {player} cannot move to {destination}")]
    InvalidMove { player: u8, destination: Cell },

    #[error("player {0} has no legal token move")]
    NoLegalMove(u8),

    #[error("{0} overlaps an existing wall")]
    WallOverlap(Wall),

    #[error("{0} crosses an existing wall")]
    WallCrossing(Wall),

    #[error("{0} would cut a player off from their goal")]
    WallBlocksPath(Wall),

    #[error("malformed players: {0}")]
    MalformedPlayers(String),

    #[error("the game is already over")]
    GameOver,
}

pub type RuleResult<T> = Result<T, RuleViolation>;
