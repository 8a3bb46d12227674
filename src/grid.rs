//! Board geometry: cells, walls and the nodes of the move graph.
//!
//! Coordinates are 1-based, `x` is the column (1 = left) and `y` is the row
//! (1 = the south edge where player 1 starts).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RuleViolation;

pub const BOARD_SIZE: i32 = 9;
pub const NUM_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Cells plus the two goal nodes.
pub const NUM_NODES: usize = NUM_CELLS + 2;

/// Walls each player starts with.
pub const MAX_WALLS: u8 = 10;

/// Walls in the box, shared between both players.
pub const TOTAL_WALLS: usize = 2 * MAX_WALLS as usize;

/// A square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(&self) -> bool {
        (1..=BOARD_SIZE).contains(&self.x) && (1..=BOARD_SIZE).contains(&self.y)
    }

    /// Row-major index, only meaningful for cells on the board.
    pub(crate) fn index(&self) -> usize {
        debug_assert!(self.is_on_board());
        ((self.y - 1) * BOARD_SIZE + (self.x - 1)) as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        let index = index as i32;
        Self::new(index % BOARD_SIZE + 1, index / BOARD_SIZE + 1)
    }

    /// Every cell of the board, row by row from the south edge.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..NUM_CELLS).map(Cell::from_index)
    }

    /// Orthogonal neighbours that exist on the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Cell> {
        let Cell { x, y } = *self;
        [(x, y + 1), (x, y - 1), (x - 1, y), (x + 1, y)]
            .into_iter()
            .map(|(x, y)| Cell::new(x, y))
            .filter(Cell::is_on_board)
    }

    /// The cell reached by jumping from `self` straight over `over`.
    pub fn jump_over(&self, over: Cell) -> Cell {
        Cell::new(2 * over.x - self.x, 2 * over.y - self.y)
    }

    pub fn is_adjacent(&self, other: Cell) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"x,y"`, `"x y"` or `"(x, y)"`. Bounds are not checked here.
impl FromStr for Cell {
    type Err = RuleViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape_error = || RuleViolation::InvalidCoordinateShape(s.to_string());
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [x, y] => {
                let x = x.parse().map_err(|_| shape_error())?;
                let y = y.parse().map_err(|_| shape_error())?;
                Ok(Cell::new(x, y))
            }
            _ => Err(shape_error()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = RuleViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            _ => Err(RuleViolation::InvalidOrientation(s.to_string())),
        }
    }
}

/// A two-cell wall.
///
/// A horizontal wall anchored at (x, y) lies between rows y-1 and y and spans
/// columns x and x+1. A vertical wall anchored at (x, y) lies between columns
/// x-1 and x and spans rows y and y+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub anchor: Cell,
    pub orientation: Orientation,
}

impl Wall {
    pub const fn new(anchor: Cell, orientation: Orientation) -> Self {
        Self { anchor, orientation }
    }

    pub const fn horizontal(x: i32, y: i32) -> Self {
        Self::new(Cell::new(x, y), Orientation::Horizontal)
    }

    pub const fn vertical(x: i32, y: i32) -> Self {
        Self::new(Cell::new(x, y), Orientation::Vertical)
    }

    pub fn is_in_bounds(&self) -> bool {
        let Cell { x, y } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => (1..BOARD_SIZE).contains(&x) && (2..=BOARD_SIZE).contains(&y),
            Orientation::Vertical => (2..=BOARD_SIZE).contains(&x) && (1..BOARD_SIZE).contains(&y),
        }
    }

    /// The two cell pairs this wall separates.
    pub fn blocked_edges(&self) -> [(Cell, Cell); 2] {
        let Cell { x, y } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => [
                (Cell::new(x, y - 1), Cell::new(x, y)),
                (Cell::new(x + 1, y - 1), Cell::new(x + 1, y)),
            ],
            Orientation::Vertical => [
                (Cell::new(x - 1, y), Cell::new(x, y)),
                (Cell::new(x - 1, y + 1), Cell::new(x, y + 1)),
            ],
        }
    }

    /// Anchors of same-orientation walls that would share a segment with this one.
    pub fn overlapping_anchors(&self) -> [Cell; 3] {
        let Cell { x, y } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => [Cell::new(x, y), Cell::new(x - 1, y), Cell::new(x + 1, y)],
            Orientation::Vertical => [Cell::new(x, y), Cell::new(x, y - 1), Cell::new(x, y + 1)],
        }
    }

    /// The perpendicular wall sharing this wall's midpoint.
    pub fn crossing(&self) -> Wall {
        let Cell { x, y } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => Wall::vertical(x + 1, y - 1),
            Orientation::Vertical => Wall::horizontal(x - 1, y + 1),
        }
    }

    /// Every in-bounds vertical wall, row by row from the south edge and left
    /// to right within a row.
    pub fn vertical_candidates() -> impl Iterator<Item = Wall> {
        (1..BOARD_SIZE).flat_map(|y| (2..=BOARD_SIZE).map(move |x| Wall::vertical(x, y)))
    }

    /// Every in-bounds wall: the vertical candidates, then the horizontal
    /// ones in the same order.
    pub fn candidates() -> impl Iterator<Item = Wall> {
        let horizontal = (2..=BOARD_SIZE)
            .flat_map(|y| (1..BOARD_SIZE).map(move |x| Wall::horizontal(x, y)));
        Wall::vertical_candidates().chain(horizontal)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wall at {}", self.orientation, self.anchor)
    }
}

/// A node of the move graph: a board cell or one of the two goal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Cell(Cell),
    /// Row 9, the goal of player 1.
    GoalNorth,
    /// Row 1, the goal of player 2.
    GoalSouth,
}

impl Node {
    pub(crate) fn index(&self) -> usize {
        match self {
            Node::Cell(cell) => cell.index(),
            Node::GoalNorth => NUM_CELLS,
            Node::GoalSouth => NUM_CELLS + 1,
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        match index {
            i if i < NUM_CELLS => Node::Cell(Cell::from_index(i)),
            i if i == NUM_CELLS => Node::GoalNorth,
            _ => Node::GoalSouth,
        }
    }

    pub fn cell(&self) -> Option<Cell> {
        match self {
            Node::Cell(cell) => Some(*cell),
            _ => None,
        }
    }
}

impl From<Cell> for Node {
    fn from(cell: Cell) -> Self {
        Node::Cell(cell)
    }
}

/// Goal node of player 1 or 2.
pub fn goal_node(player: u8) -> Node {
    if player == 1 {
        Node::GoalNorth
    } else {
        Node::GoalSouth
    }
}

/// Row a player must reach to win.
pub fn goal_row(player: u8) -> i32 {
    if player == 1 {
        BOARD_SIZE
    } else {
        1
    }
}
