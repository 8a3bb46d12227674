//! Python bindings, available with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::RuleViolation;
use crate::game_state::{GameState, PlayerSetup, Quoridor};
use crate::grid::{Cell, Orientation, MAX_WALLS};
use crate::heuristic::TurnOutcome;

fn to_py_err(err: RuleViolation) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A game of Quoridor. Rule violations raise `ValueError`.
#[pyclass(name = "Quoridor")]
pub struct PyQuoridor {
    game: Quoridor,
}

#[pymethods]
impl PyQuoridor {
    #[new]
    fn new(player1: String, player2: String) -> PyResult<Self> {
        let game = Quoridor::new(PlayerSetup::by_names(player1, player2)).map_err(to_py_err)?;
        Ok(Self { game })
    }

    /// Restore a game from the YAML produced by `state()`.
    #[staticmethod]
    fn from_state(yaml: &str) -> PyResult<Self> {
        let snapshot: GameState =
            serde_yaml::from_str(yaml).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let game = Quoridor::from_snapshot(snapshot).map_err(to_py_err)?;
        Ok(Self { game })
    }

    fn move_token(&mut self, player: u8, x: i32, y: i32) -> PyResult<()> {
        self.game
            .move_token(player, Cell::new(x, y))
            .map_err(to_py_err)
    }

    /// `orientation` is "horizontal" or "vertical" (or "h" / "v").
    fn place_wall(&mut self, player: u8, x: i32, y: i32, orientation: &str) -> PyResult<()> {
        let orientation: Orientation = orientation.parse().map_err(to_py_err)?;
        self.game
            .place_wall(player, Cell::new(x, y), orientation)
            .map_err(to_py_err)
    }

    /// Play one heuristic turn. Returns `("move", (x, y))` or
    /// `("horizontal" | "vertical", (x, y))`.
    fn auto_turn(&mut self, player: u8) -> PyResult<(String, (i32, i32))> {
        let outcome = self.game.auto_turn(player).map_err(to_py_err)?;
        Ok(match outcome {
            TurnOutcome::MovedToken(cell) => ("move".to_string(), (cell.x, cell.y)),
            TurnOutcome::PlacedWall(orientation, anchor) => {
                (orientation.to_string(), (anchor.x, anchor.y))
            }
        })
    }

    fn winner(&self) -> Option<String> {
        self.game.winner().map(str::to_string)
    }

    /// Full state as YAML.
    fn state(&self) -> PyResult<String> {
        serde_yaml::to_string(&self.game.snapshot()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __str__(&self) -> String {
        self.game.to_string()
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn quoridor_engine(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyQuoridor>()?;
    m.add("MAX_WALLS", MAX_WALLS)?;
    Ok(())
}
