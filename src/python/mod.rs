//! Python bindings for the memory-match engine.
//!
//! # Quick Start
//!
//! ```python
//! import memory_match as mm
//!
//! game = mm.MatchGame(seed=7, symbols=["A", "B", "C"])
//! game.reveal(0)
//! game.reveal(1)
//! game.advance(600)
//! print(game.faces(), game.move_count)
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::PyMatchGame;

/// memory_match: a memory-matching card game engine.
#[pymodule]
fn memory_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMatchGame>()?;
    Ok(())
}
