//! Text rendering of a game snapshot.
//!
//! The board is drawn on a character canvas that interleaves cell rows with
//! the gaps between them, so walls land on the gap rows and columns.

use std::fmt;

use ndarray::Array2;

use crate::game_state::{GameState, Quoridor};
use crate::grid::{Cell, Orientation, BOARD_SIZE};

const CANVAS_ROWS: usize = 2 * BOARD_SIZE as usize - 1;
const CANVAS_COLS: usize = 4 * BOARD_SIZE as usize - 1;

/// Canvas row of a cell row, row 9 on top.
fn cell_row(y: i32) -> usize {
    (2 * (BOARD_SIZE - y)) as usize
}

/// Canvas column of a cell's center.
fn cell_col(x: i32) -> usize {
    (4 * (x - 1) + 1) as usize
}

fn draw_canvas(state: &GameState) -> Array2<char> {
    let mut canvas = Array2::from_elem((CANVAS_ROWS, CANVAS_COLS), ' ');

    for cell in Cell::all() {
        canvas[[cell_row(cell.y), cell_col(cell.x)]] = '.';
    }
    for (index, player) in state.players.iter().enumerate() {
        if !player.position.is_on_board() {
            continue;
        }
        let digit = if index == 0 { '1' } else { '2' };
        canvas[[cell_row(player.position.y), cell_col(player.position.x)]] = digit;
    }

    let walls: Vec<_> = state.walls.iter().filter(|w| w.is_in_bounds()).collect();

    // Horizontal walls go on top of vertical ones
    for wall in walls.iter().filter(|w| w.orientation == Orientation::Vertical) {
        let col = cell_col(wall.anchor.x) - 2;
        let bottom = cell_row(wall.anchor.y);
        for row in bottom - 2..=bottom {
            canvas[[row, col]] = '|';
        }
    }
    for wall in walls.iter().filter(|w| w.orientation == Orientation::Horizontal) {
        let row = cell_row(wall.anchor.y) + 1;
        let start = cell_col(wall.anchor.x) - 1;
        for col in start..start + 7 {
            canvas[[row, col]] = '-';
        }
    }

    canvas
}

/// Render `state` as the text board with its legend.
pub fn render(state: &GameState) -> String {
    let canvas = draw_canvas(state);
    let border = "-".repeat(CANVAS_COLS);
    let mut out = String::new();

    out.push_str(&format!(
        "Legend: 1={}, 2={}\n",
        state.players[0].name, state.players[1].name
    ));
    out.push_str(&format!("   {}\n", border));

    for (r, row) in canvas.rows().into_iter().enumerate() {
        if r % 2 == 0 {
            out.push_str(&format!("{} |", BOARD_SIZE - (r / 2) as i32));
        } else {
            out.push_str("  |");
        }
        out.extend(row.iter());
        out.push_str("|\n");
    }

    out.push_str(&format!("--|{}\n", border));
    out.push_str("  |");
    for x in 1..=BOARD_SIZE {
        out.push_str(&format!(" {}  ", x));
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render(self))
    }
}

impl fmt::Display for Quoridor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render(self.state()))
    }
}
