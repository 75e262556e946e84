//! Round state and its pure transitions.
//!
//! `RoundState` knows nothing about time. The controller decides *when*
//! `evaluate`, `conceal` and `tick` run; this module decides *what* they do.
//!
//! ## Invariants
//!
//! - `revealed.len() <= 2`
//! - a position is in `revealed` only while its card is face up and unmatched
//! - `matched_count` is even and equals the number of matched cards
//!
//! The deck is an `im::Vector`, so cloning a round for a renderer is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardPos};

/// Lifecycle of a single round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Dealt, nothing revealed yet.
    #[default]
    Idle,
    /// At least one reveal made, pairs remain.
    InProgress,
    /// Every pair matched. Terminal until reset.
    Complete,
}

/// Why a reveal was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Two cards are already waiting for resolution.
    PairPending,
    /// The card is showing already.
    AlreadyFaceUp,
    /// The card is part of a confirmed pair.
    AlreadyMatched,
    /// No card at that position.
    OutOfRange,
    /// The round is over.
    RoundComplete,
}

/// Result of a reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The card turned face up.
    Revealed {
        /// This was the first reveal of the round.
        started_round: bool,
        /// Two cards now wait for evaluation.
        pair_ready: bool,
    },
}

impl RevealOutcome {
    /// Whether the reveal changed the round.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Revealed { .. })
    }
}

/// Result of evaluating two revealed cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Same symbol: both cards are now matched.
    Matched {
        first: CardPos,
        second: CardPos,
        /// This pair finished the round.
        round_complete: bool,
    },
    /// Different symbols: both cards stay face up until concealed.
    Mismatched { first: CardPos, second: CardPos },
}

/// State of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    deck: Vector<Card>,
    revealed: SmallVec<[CardPos; 2]>,
    matched_count: usize,
    move_count: u32,
    elapsed_seconds: u32,
    phase: RoundPhase,
}

impl RoundState {
    /// Fresh round over a dealt deck.
    ///
    /// Cards are normalized to face down and unmatched.
    #[must_use]
    pub fn new(deck: impl IntoIterator<Item = Card>) -> Self {
        let deck = deck
            .into_iter()
            .map(|c| Card::new(c.id, c.symbol))
            .collect();
        Self {
            deck,
            revealed: SmallVec::new(),
            matched_count: 0,
            move_count: 0,
            elapsed_seconds: 0,
            phase: RoundPhase::Idle,
        }
    }

    // === Read access ===

    /// Cards in board order.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    /// Card at a position.
    #[must_use]
    pub fn card(&self, pos: CardPos) -> Option<&Card> {
        self.deck.get(pos.index())
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    /// True only for a round dealt from an empty deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Positions waiting for evaluation, in reveal order.
    #[must_use]
    pub fn revealed(&self) -> &[CardPos] {
        &self.revealed
    }

    /// Number of matched cards (two per pair).
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    /// Accepted reveals this round.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Timer ticks since the first reveal.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Whether the first reveal has happened.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase != RoundPhase::Idle
    }

    /// Whether every pair is matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    /// Positions a reveal would currently be accepted at.
    #[must_use]
    pub fn legal_reveals(&self) -> Vec<CardPos> {
        if self.revealed.len() >= 2 || self.is_complete() {
            return Vec::new();
        }
        self.deck
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.face_up && !c.matched)
            .map(|(i, _)| CardPos::new(i))
            .collect()
    }

    // === Transitions ===

    /// Turn a card face up.
    ///
    /// Ignored, with no state change, when a pair is pending, the card is
    /// face up or matched, the position is off the board, or the round is
    /// over.
    pub fn reveal(&mut self, pos: CardPos) -> RevealOutcome {
        if let Some(reason) = self.ignore_reason(pos) {
            return RevealOutcome::Ignored(reason);
        }

        let started_round = self.phase == RoundPhase::Idle;
        if started_round {
            self.phase = RoundPhase::InProgress;
        }

        if let Some(card) = self.deck.get_mut(pos.index()) {
            card.face_up = true;
        }
        self.revealed.push(pos);
        self.move_count += 1;

        RevealOutcome::Revealed {
            started_round,
            pair_ready: self.revealed.len() == 2,
        }
    }

    fn ignore_reason(&self, pos: CardPos) -> Option<IgnoreReason> {
        if self.is_complete() {
            return Some(IgnoreReason::RoundComplete);
        }
        if self.revealed.len() >= 2 {
            return Some(IgnoreReason::PairPending);
        }
        let card = match self.card(pos) {
            Some(card) => card,
            None => return Some(IgnoreReason::OutOfRange),
        };
        if card.matched {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.face_up {
            Some(IgnoreReason::AlreadyFaceUp)
        } else {
            None
        }
    }

    /// Resolve the two revealed cards.
    ///
    /// Returns `None` unless exactly two cards are revealed. `revealed` is
    /// cleared either way; mismatched cards stay face up until
    /// [`conceal`](Self::conceal).
    pub fn evaluate(&mut self) -> Option<Resolution> {
        let (first, second) = match self.revealed.as_slice() {
            [a, b] => (*a, *b),
            _ => return None,
        };
        self.revealed.clear();

        let is_pair = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        if !is_pair {
            return Some(Resolution::Mismatched { first, second });
        }

        for pos in [first, second] {
            if let Some(card) = self.deck.get_mut(pos.index()) {
                card.matched = true;
            }
        }
        self.matched_count += 2;

        let round_complete = self.matched_count == self.deck.len();
        if round_complete {
            self.phase = RoundPhase::Complete;
        }

        Some(Resolution::Matched {
            first,
            second,
            round_complete,
        })
    }

    /// Turn unmatched cards face down again.
    ///
    /// Positions still in `revealed` or already matched are left alone.
    /// Returns the positions that actually flipped.
    pub fn conceal(&mut self, positions: &[CardPos]) -> SmallVec<[CardPos; 2]> {
        let mut flipped = SmallVec::new();
        for &pos in positions {
            if self.revealed.contains(&pos) {
                continue;
            }
            if let Some(card) = self.deck.get_mut(pos.index()) {
                if card.is_pending() {
                    card.face_up = false;
                    flipped.push(pos);
                }
            }
        }
        flipped
    }

    /// One timer period passed. Counts only while the round is in progress.
    pub fn tick(&mut self) -> bool {
        self.tick_by(1)
    }

    /// `periods` timer periods passed at once. The counter saturates.
    pub fn tick_by(&mut self, periods: u64) -> bool {
        if self.phase != RoundPhase::InProgress {
            return false;
        }
        let periods = u32::try_from(periods).unwrap_or(u32::MAX);
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(periods);
        true
    }
}
