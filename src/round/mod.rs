//! Round state: board, revealed cards, counters, phase.
//!
//! The transitions here are pure. Timing lives in [`crate::schedule`] and
//! the controller that ties them together is [`crate::engine::MatchGame`].

pub mod state;

pub use state::{IgnoreReason, Resolution, RevealOutcome, RoundPhase, RoundState};
