//! Host actions and their history.
//!
//! Every input the host can send is an `Action`. `MatchGame::apply` routes
//! them. Card reveals and refused "play again" requests are kept as
//! `ActionRecord`s for the current round.

use serde::{Deserialize, Serialize};

use crate::cards::CardPos;

/// An input from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Turn the card at a position face up.
    Reveal(CardPos),

    /// Let virtual time pass, firing due timers.
    Advance {
        /// Milliseconds to advance.
        ms: u64,
    },

    /// "Play again": reset only once the round is complete.
    PlayAgain,

    /// Unconditional reset.
    Reset,
}

impl Action {
    /// Reveal the card at `pos`.
    #[must_use]
    pub const fn reveal(pos: usize) -> Self {
        Self::Reveal(CardPos::new(pos))
    }

    /// Advance virtual time.
    #[must_use]
    pub const fn advance(ms: u64) -> Self {
        Self::Advance { ms }
    }
}

/// A recorded action with metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Order within the round, starting at 0.
    pub sequence: u32,

    /// Virtual time when the action was applied.
    pub at_ms: u64,

    /// The action taken.
    pub action: Action,

    /// Whether the action changed anything.
    pub accepted: bool,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(sequence: u32, at_ms: u64, action: Action, accepted: bool) -> Self {
        Self {
            sequence,
            at_ms,
            action,
            accepted,
        }
    }
}
