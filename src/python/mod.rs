//! Python bindings for the Ludo engine.
//!
//! # Quick Start
//!
//! ```python
//! import ludo_engine as ludo
//!
//! game = ludo.LudoGame(teams=[0, 1, 2, 3], seed=7)
//!
//! def lowest(board, team, roll, legal):
//!     return min(legal)
//!
//! placements = game.run(lowest)
//! print(placements, game.board())
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// ludo_engine: a Ludo rules engine.
#[pymodule]
fn ludo_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLudoGame>()?;
    Ok(())
}
