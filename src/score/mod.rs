//! Best-time tracking and its persistence collaborator.

pub mod best;
pub mod store;

pub use best::BestScore;
pub use store::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
