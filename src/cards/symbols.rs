//! Symbol set: the distinct glyphs a deck is dealt from.
//!
//! A `SymbolId` is an index into the set. Cards carry only the id; renderers
//! look the glyph up through [`SymbolSet::glyph`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Identity shared by the two cards of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Index into the owning `SymbolSet`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Ordered set of distinct glyphs.
///
/// ```
/// use memory_match::cards::{SymbolId, SymbolSet};
///
/// let set = SymbolSet::new(["🍎", "🍌", "🍎"]).unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.glyph(SymbolId::new(1)), Some("🍌"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SymbolSet {
    glyphs: Vec<String>,
    seen: FxHashSet<String>,
}

impl SymbolSet {
    /// Build a set from glyphs, keeping first occurrences in order.
    pub fn new<I, S>(glyphs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for glyph in glyphs {
            let glyph = glyph.into();
            if set.seen.contains(&glyph) {
                continue;
            }
            if set.glyphs.len() > usize::from(u16::MAX) {
                return Err(MatchError::TooManySymbols(set.glyphs.len() + 1));
            }
            set.seen.insert(glyph.clone());
            set.glyphs.push(glyph);
        }

        if set.glyphs.is_empty() {
            return Err(MatchError::EmptySymbolSet);
        }
        Ok(set)
    }

    /// Number of distinct symbols (pairs per deck).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph for a symbol.
    #[must_use]
    pub fn glyph(&self, id: SymbolId) -> Option<&str> {
        self.glyphs.get(id.index()).map(String::as_str)
    }

    /// All symbol ids in order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.glyphs.len()).map(|i| SymbolId(i as u16))
    }

    /// All glyphs in order.
    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(String::as_str)
    }
}
