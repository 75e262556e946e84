//! Core engine types: actions, RNG, configuration.

pub mod action;
pub mod config;
pub mod rng;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, DEFAULT_BEST_SCORE_KEY, DEFAULT_SYMBOLS};
pub use rng::{GameRng, GameRngState};
