//! Card system: symbols, cards, and deck building.
//!
//! ## Key Types
//!
//! - `SymbolId`: Pair identity, an index into a `SymbolSet`
//! - `SymbolSet`: Ordered distinct glyphs
//! - `Card`: Runtime card state (face up, matched)
//! - `CardPos`: Position of a card on the board
//! - `DeckBuilder`: Deals two cards per symbol and shuffles them

pub mod card;
pub mod deck;
pub mod symbols;

pub use card::{Card, CardId, CardPos};
pub use deck::DeckBuilder;
pub use symbols::{SymbolId, SymbolSet};
