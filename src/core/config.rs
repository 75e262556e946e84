//! Game configuration.
//!
//! Hosts configure the engine at startup with a `GameConfig`:
//! - the symbol glyphs dealt as pairs
//! - the visual delays before a pair resolves and before a mismatch hides
//! - the timer tick interval and celebration length
//! - the storage key for the best time
//!
//! Every field has a default, so a JSON config may name only what it changes.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Storage key for the best completion time.
pub const DEFAULT_BEST_SCORE_KEY: &str = "memoryGameTimeHighScore";

/// The fruit glyphs of the default board.
pub const DEFAULT_SYMBOLS: [&str; 6] = ["🍎", "🍌", "🍇", "🍒", "🍋", "🥝"];

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect()
}

fn default_reveal_delay_ms() -> u64 {
    600
}

fn default_mismatch_delay_ms() -> u64 {
    600
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_celebration_ms() -> u64 {
    3000
}

fn default_best_score_key() -> String {
    DEFAULT_BEST_SCORE_KEY.to_string()
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Glyphs dealt as pairs. Duplicates are folded when the symbol set is built.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Pause between the second reveal and pair evaluation.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    /// Pause before a mismatched pair turns face down.
    #[serde(default = "default_mismatch_delay_ms")]
    pub mismatch_delay_ms: u64,

    /// Period of the elapsed-seconds counter.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// How long the win celebration stays up.
    #[serde(default = "default_celebration_ms")]
    pub celebration_ms: u64,

    /// Key under which the best time is persisted.
    #[serde(default = "default_best_score_key")]
    pub best_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            reveal_delay_ms: default_reveal_delay_ms(),
            mismatch_delay_ms: default_mismatch_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            celebration_ms: default_celebration_ms(),
            best_score_key: default_best_score_key(),
        }
    }
}

impl GameConfig {
    /// Default configuration: six fruit pairs, 600 ms delays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the symbol glyphs.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the reveal delay.
    #[must_use]
    pub fn with_reveal_delay_ms(mut self, ms: u64) -> Self {
        self.reveal_delay_ms = ms;
        self
    }

    /// Set the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set the timer tick interval.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the celebration length.
    #[must_use]
    pub fn with_celebration_ms(mut self, ms: u64) -> Self {
        self.celebration_ms = ms;
        self
    }

    /// Set the best-score storage key.
    #[must_use]
    pub fn with_best_score_key(mut self, key: impl Into<String>) -> Self {
        self.best_score_key = key.into();
        self
    }

    /// Check the config can drive a round.
    ///
    /// Delays must be non-zero so both cards of a pair are visible before
    /// resolution.
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(MatchError::EmptySymbolSet);
        }
        if self.symbols.len() > usize::from(u16::MAX) {
            return Err(MatchError::TooManySymbols(self.symbols.len()));
        }

        let delays = [
            ("reveal_delay_ms", self.reveal_delay_ms),
            ("mismatch_delay_ms", self.mismatch_delay_ms),
            ("tick_interval_ms", self.tick_interval_ms),
        ];
        for (name, value) in delays {
            if value == 0 {
                return Err(MatchError::InvalidConfig(format!("{name} must be non-zero")));
            }
        }

        if self.best_score_key.is_empty() {
            return Err(MatchError::InvalidConfig("best_score_key is empty".into()));
        }
        Ok(())
    }
}
