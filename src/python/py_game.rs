//! Game bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::CardPos;
use crate::core::GameConfig;
use crate::engine::MatchGame;
use crate::error::MatchError;
use crate::round::RevealOutcome;
use crate::score::{JsonFileScoreStore, MemoryScoreStore};
use crate::view::CardFace;

fn to_py_err(err: MatchError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for MatchGame.
#[pyclass(name = "MatchGame")]
pub struct PyMatchGame {
    game: MatchGame,
}

#[pymethods]
impl PyMatchGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - seed: RNG seed for reproducible deals
    /// - symbols: glyphs to deal as pairs (default: six fruits)
    /// - score_file: JSON file for the best time (default: in-memory)
    /// - config_json: full JSON config; `symbols` overrides its symbol list
    #[new]
    #[pyo3(signature = (seed = 42, symbols = None, score_file = None, config_json = None))]
    fn new(
        seed: u64,
        symbols: Option<Vec<String>>,
        score_file: Option<String>,
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let mut config = match config_json {
            Some(json) => GameConfig::from_json(json).map_err(to_py_err)?,
            None => GameConfig::new(),
        };
        if let Some(symbols) = symbols {
            config = config.with_symbols(symbols);
        }

        let game = match score_file {
            Some(path) => MatchGame::new(config, seed, JsonFileScoreStore::new(path)),
            None => MatchGame::new(config, seed, MemoryScoreStore::new()),
        }
        .map_err(to_py_err)?;
        Ok(Self { game })
    }

    /// Reveal the card at `pos`. Returns False if the reveal was ignored.
    fn reveal(&mut self, pos: usize) -> bool {
        matches!(
            self.game.reveal(CardPos::new(pos)),
            RevealOutcome::Revealed { .. }
        )
    }

    /// Advance virtual time. Returns the number of timers fired.
    fn advance(&mut self, ms: u64) -> usize {
        self.game.advance(ms)
    }

    /// Start a new round once the current one is won.
    fn play_again(&mut self) -> bool {
        self.game.play_again()
    }

    /// Deal a new round unconditionally.
    fn reset(&mut self) {
        self.game.reset();
    }

    /// Positions a reveal would be accepted at.
    fn legal_reveals(&self) -> Vec<usize> {
        self.game
            .state()
            .legal_reveals()
            .into_iter()
            .map(CardPos::index)
            .collect()
    }

    /// Glyph per position, None for face-down cards.
    fn faces(&self) -> Vec<Option<String>> {
        self.game
            .view()
            .faces()
            .into_iter()
            .map(|face| match face {
                CardFace::Hidden => None,
                CardFace::Shown(g) | CardFace::Matched(g) => Some(g),
            })
            .collect()
    }

    /// Drain events as JSON strings.
    fn drain_events(&mut self) -> PyResult<Vec<String>> {
        self.game
            .drain_events()
            .iter()
            .map(|e| serde_json::to_string(e).map_err(|err| to_py_err(err.into())))
            .collect()
    }

    /// Snapshot bytes that `MatchGame.restore` accepts.
    fn snapshot(&self) -> PyResult<Vec<u8>> {
        self.game.snapshot().map_err(to_py_err)
    }

    /// Rebuild a game from snapshot bytes.
    ///
    /// The best time is kept from the snapshot unless `score_file` holds a
    /// lower one.
    #[staticmethod]
    #[pyo3(signature = (bytes, score_file = None))]
    fn restore(bytes: Vec<u8>, score_file: Option<String>) -> PyResult<Self> {
        let game = match score_file {
            Some(path) => MatchGame::restore(&bytes, JsonFileScoreStore::new(path)),
            None => MatchGame::restore(&bytes, MemoryScoreStore::new()),
        }
        .map_err(to_py_err)?;
        Ok(Self { game })
    }

    #[getter]
    fn card_count(&self) -> usize {
        self.game.state().len()
    }

    #[getter]
    fn move_count(&self) -> u32 {
        self.game.state().move_count()
    }

    #[getter]
    fn matched_count(&self) -> usize {
        self.game.state().matched_count()
    }

    #[getter]
    fn elapsed_seconds(&self) -> u32 {
        self.game.state().elapsed_seconds()
    }

    #[getter]
    fn best_seconds(&self) -> Option<u32> {
        self.game.best().seconds()
    }

    #[getter]
    fn is_complete(&self) -> bool {
        self.game.state().is_complete()
    }

    #[getter]
    fn round(&self) -> u32 {
        self.game.round()
    }

    /// Completion banner, empty until the round is won.
    fn result_message(&self) -> String {
        self.game.view().result_message()
    }

    fn __repr__(&self) -> String {
        let state = self.game.state();
        format!(
            "MatchGame(round={}, phase={:?}, moves={}, matched={}/{}, time={}s)",
            self.game.round(),
            state.phase(),
            state.move_count(),
            state.matched_count(),
            state.len(),
            state.elapsed_seconds()
        )
    }
}
