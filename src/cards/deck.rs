//! Deck building: two cards per symbol, shuffled.

use super::card::{Card, CardId};
use super::symbols::SymbolSet;
use crate::core::GameRng;

/// Builds decks of pairs from a symbol set.
///
/// ```
/// use memory_match::cards::{DeckBuilder, SymbolSet};
/// use memory_match::core::GameRng;
///
/// let symbols = SymbolSet::new(["🍎", "🍌", "🍇"]).unwrap();
/// let deck = DeckBuilder::new(&symbols).build(&mut GameRng::new(1));
/// assert_eq!(deck.len(), 6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DeckBuilder<'a> {
    symbols: &'a SymbolSet,
}

impl<'a> DeckBuilder<'a> {
    /// Create a builder over a symbol set.
    #[must_use]
    pub fn new(symbols: &'a SymbolSet) -> Self {
        Self { symbols }
    }

    /// Number of cards every deck from this builder has.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.symbols.len() * 2
    }

    /// Unshuffled layout `[s0, s1, .., sN-1, s0, s1, .., sN-1]`.
    ///
    /// Position `k` and position `k + N` hold the pair for symbol `k`.
    #[must_use]
    pub fn build_ordered(&self) -> Vec<Card> {
        let n = self.symbols.len();
        let mut deck = Vec::with_capacity(n * 2);
        for copy in 0..2u32 {
            for symbol in self.symbols.ids() {
                let id = CardId::new(u32::from(symbol.0) * 2 + copy);
                deck.push(Card::new(id, symbol));
            }
        }
        deck
    }

    /// Build a deck and Fisher–Yates shuffle it.
    #[must_use]
    pub fn build(&self, rng: &mut GameRng) -> Vec<Card> {
        let mut deck = self.build_ordered();
        rng.shuffle(&mut deck);
        tracing::debug!(cards = deck.len(), seed = rng.seed(), "dealt deck");
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SymbolId;

    fn count_symbol(deck: &[Card], symbol: SymbolId) -> usize {
        deck.iter().filter(|c| c.symbol == symbol).count()
    }

    #[test]
    fn test_ordered_layout() {
        let symbols = SymbolSet::new(["a", "b", "c"]).unwrap();
        let deck = DeckBuilder::new(&symbols).build_ordered();

        assert_eq!(deck.len(), 6);
        for k in 0..3 {
            assert!(deck[k].pairs_with(&deck[k + 3]));
        }
        assert!(deck.iter().all(|c| !c.face_up && !c.matched));
    }

    #[test]
    fn test_card_ids_unique() {
        let symbols = SymbolSet::new(["a", "b", "c", "d"]).unwrap();
        let mut ids: Vec<_> = DeckBuilder::new(&symbols)
            .build_ordered()
            .iter()
            .map(|c| c.id.raw())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_each_symbol_twice() {
        let symbols = SymbolSet::new(["a", "b", "c", "d", "e", "f"]).unwrap();
        let builder = DeckBuilder::new(&symbols);
        let deck = builder.build(&mut GameRng::new(99));

        assert_eq!(deck.len(), builder.deck_size());
        for symbol in symbols.ids() {
            assert_eq!(count_symbol(&deck, symbol), 2);
        }
    }

    #[test]
    fn test_single_symbol() {
        let symbols = SymbolSet::new(["solo"]).unwrap();
        let deck = DeckBuilder::new(&symbols).build(&mut GameRng::new(3));

        assert_eq!(deck.len(), 2);
        assert!(deck[0].pairs_with(&deck[1]));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let symbols = SymbolSet::new(["a", "b", "c", "d", "e", "f"]).unwrap();
        let builder = DeckBuilder::new(&symbols);

        let first = builder.build(&mut GameRng::new(5));
        let second = builder.build(&mut GameRng::new(5));
        let other = builder.build(&mut GameRng::new(6));

        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
