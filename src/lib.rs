//! # memory-match
//!
//! A memory-matching ("concentration") card game engine.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `RoundState` changes only through `reveal`,
//!    `evaluate`, `conceal` and `tick`, none of which know about time or
//!    rendering.
//!
//! 2. **Virtual time**: Delays and the elapsed-seconds counter are explicit
//!    scheduled tasks. The host drives the clock with `advance(ms)`, and a
//!    reset cancels every pending task at once.
//!
//! 3. **Ignore, don't fail**: Invalid input (a third card, a matched card,
//!    a position off the board) is a no-op with a reason, never an error.
//!
//! ## Round Lifecycle
//!
//! `Idle → InProgress (first reveal) → Complete (last pair)`, then
//! `reset()` deals a fresh shuffled deck and returns to `Idle`.
//!
//! ## Modules
//!
//! - `core`: Configuration, RNG, host actions
//! - `cards`: Symbols, cards, deck building
//! - `round`: Round state and its transitions
//! - `schedule`: Deferred tasks on the virtual clock
//! - `score`: Best time and its persistence
//! - `events`: Events for the render surface
//! - `view`: Read-only board view
//! - `engine`: The `MatchGame` controller and snapshots
//!
//! ```
//! use memory_match::{GameConfig, MatchGame, MemoryScoreStore};
//!
//! let mut game = MatchGame::new(GameConfig::new(), 42, MemoryScoreStore::new()).unwrap();
//! assert_eq!(game.state().len(), 12);
//! assert_eq!(game.view().best_label(), "N/A");
//!
//! let legal = game.state().legal_reveals();
//! game.reveal(legal[0]);
//! assert_eq!(game.state().move_count(), 1);
//! ```

pub mod cards;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod round;
pub mod schedule;
pub mod score;
pub mod view;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GameConfig, GameRng, GameRngState, DEFAULT_BEST_SCORE_KEY, DEFAULT_SYMBOLS,
};

pub use crate::cards::{Card, CardId, CardPos, DeckBuilder, SymbolId, SymbolSet};

pub use crate::round::{IgnoreReason, Resolution, RevealOutcome, RoundPhase, RoundState};

pub use crate::schedule::{ScheduledTask, Scheduler, TaskId, TaskKind};

pub use crate::score::{BestScore, JsonFileScoreStore, MemoryScoreStore, ScoreStore};

pub use crate::events::{GameEvent, RoundOutcome, TimedEvent};

pub use crate::view::{BoardView, CardFace};

pub use crate::engine::{GameSnapshot, MatchGame};

pub use crate::error::{MatchError, Result};
