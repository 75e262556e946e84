//! Read-only board view for render surfaces.
//!
//! A renderer should never need engine internals: everything it draws is
//! available from a `BoardView`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardPos, SymbolSet};
use crate::events::RoundOutcome;
use crate::round::{RoundPhase, RoundState};
use crate::score::BestScore;

/// What to draw for one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Card back.
    Hidden,
    /// Face up, not yet part of a pair.
    Shown(String),
    /// Face up for good.
    Matched(String),
}

impl CardFace {
    /// Glyph if the face is showing.
    #[must_use]
    pub fn glyph(&self) -> Option<&str> {
        match self {
            Self::Hidden => None,
            Self::Shown(g) | Self::Matched(g) => Some(g),
        }
    }
}

/// Borrowed snapshot of everything a renderer needs.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    pub(crate) state: &'a RoundState,
    pub(crate) symbols: &'a SymbolSet,
    pub(crate) best: BestScore,
    pub(crate) outcome: Option<RoundOutcome>,
    pub(crate) celebrating: bool,
}

impl<'a> BoardView<'a> {
    /// Raw round state.
    #[must_use]
    pub fn state(&self) -> &'a RoundState {
        self.state
    }

    /// Face for one position, `None` off the board.
    #[must_use]
    pub fn face(&self, pos: CardPos) -> Option<CardFace> {
        let card = self.state.card(pos)?;
        if !card.face_up {
            return Some(CardFace::Hidden);
        }
        let glyph = self.symbols.glyph(card.symbol).unwrap_or("?").to_string();
        Some(if card.matched {
            CardFace::Matched(glyph)
        } else {
            CardFace::Shown(glyph)
        })
    }

    /// Faces in board order.
    #[must_use]
    pub fn faces(&self) -> Vec<CardFace> {
        (0..self.state.len())
            .filter_map(|i| self.face(CardPos::new(i)))
            .collect()
    }

    /// Round phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    /// Timer text, e.g. `"12s"`.
    #[must_use]
    pub fn timer_label(&self) -> String {
        format!("{}s", self.state.elapsed_seconds())
    }

    /// Move counter text.
    #[must_use]
    pub fn moves_label(&self) -> String {
        self.state.move_count().to_string()
    }

    /// Best time text, `"N/A"` without a record.
    #[must_use]
    pub fn best_label(&self) -> String {
        self.best.label()
    }

    /// Completion banner, empty until the round is won.
    #[must_use]
    pub fn result_message(&self) -> String {
        self.outcome.map(|o| o.to_string()).unwrap_or_default()
    }

    /// Final numbers once the round is won.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Show the "play again" affordance.
    #[must_use]
    pub fn play_again_visible(&self) -> bool {
        self.state.is_complete()
    }

    /// The celebration effect should be on screen.
    #[must_use]
    pub fn celebrating(&self) -> bool {
        self.celebrating
    }
}
