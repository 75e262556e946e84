//! Events emitted by the controller.
//!
//! The host drains these after each call and maps them onto its render
//! surface: flip animations, the timer label, the win banner, confetti.
//! `RoundWon` is emitted exactly once per completed round.

use serde::{Deserialize, Serialize};

use crate::cards::{CardPos, SymbolId};

/// Final numbers of a completed round. Payload of the win signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Seconds on the timer when the last pair matched.
    pub elapsed_seconds: u32,

    /// Accepted reveals.
    pub move_count: u32,

    /// Best time after this round was counted.
    pub best_seconds: Option<u32>,

    /// This round set the best time.
    pub new_best: bool,
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "🎉 You won in {} seconds with {} moves!",
            self.elapsed_seconds, self.move_count
        )
    }
}

/// Something that happened, stamped with virtual time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    pub event: GameEvent,
}

/// Things the render surface reacts to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First reveal of the round; the timer is running.
    RoundStarted { round: u32 },

    /// A card turned face up.
    CardRevealed { pos: CardPos, symbol: SymbolId },

    /// Two revealed cards share a symbol.
    PairMatched {
        first: CardPos,
        second: CardPos,
        matched_count: usize,
    },

    /// Two revealed cards differ; they hide after the mismatch delay.
    PairMismatched { first: CardPos, second: CardPos },

    /// Cards turned face down again.
    CardsConcealed { positions: Vec<CardPos> },

    /// The elapsed-seconds counter advanced.
    TimerTick { elapsed_seconds: u32 },

    /// Every pair is matched.
    RoundWon(RoundOutcome),

    /// Start the decorative celebration.
    CelebrationStarted,

    /// Take the celebration down.
    CelebrationEnded,

    /// A fresh deck was dealt.
    RoundReset { round: u32 },
}

impl GameEvent {
    /// Whether this is the win signal.
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, Self::RoundWon(_))
    }
}
