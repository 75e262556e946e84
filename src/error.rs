//! Error types for configuration, persistence and snapshots.
//!
//! Gameplay input never produces an error: invalid reveals are ignored and
//! reported through [`crate::round::IgnoreReason`] instead.

use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A deck needs at least one symbol.
    #[error("symbol set is empty")]
    EmptySymbolSet,

    /// Symbol ids are `u16`.
    #[error("too many symbols: {0} (max {})", u16::MAX)]
    TooManySymbols(usize),

    /// Configuration rejected by validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Score store I/O failure.
    #[error("score store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure (config, file store).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot encoding or decoding failure.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Snapshot decoded but describes an impossible round.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, MatchError>;
