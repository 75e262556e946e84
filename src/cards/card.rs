//! Cards on the board.
//!
//! A `Card` is created at deck-build time and discarded on reset. Only the
//! round state flips `face_up` and `matched`.

use serde::{Deserialize, Serialize};

use super::symbols::SymbolId;

/// Unique identifier for a card within one deck.
///
/// Assigned before the shuffle, so ids `2k` and `2k + 1` are the pair for
/// symbol `k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Position of a card in the dealt deck. Input refers to cards by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardPos(pub usize);

impl CardPos {
    /// Create a new position.
    #[must_use]
    pub const fn new(pos: usize) -> Self {
        Self(pos)
    }

    /// Index into the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card and its visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the deck.
    pub id: CardId,

    /// Pair identity.
    pub symbol: SymbolId,

    /// Showing its symbol.
    pub face_up: bool,

    /// Part of a confirmed pair.
    pub matched: bool,
}

impl Card {
    /// A face-down, unmatched card.
    #[must_use]
    pub const fn new(id: CardId, symbol: SymbolId) -> Self {
        Self {
            id,
            symbol,
            face_up: false,
            matched: false,
        }
    }

    /// Whether this card and `other` form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }

    /// Face up but not yet part of a confirmed pair.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.face_up && !self.matched
    }
}
