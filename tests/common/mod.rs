//! Shared fixtures for integration tests.

#![allow(dead_code)]

use memory_match::{
    CardPos, DeckBuilder, GameConfig, MatchError, MatchGame, MemoryScoreStore, ScoreStore, SymbolSet,
};

pub const THREE: [&str; 3] = ["🍎", "🍌", "🍇"];

/// Install a test-writer subscriber once; RUST_LOG controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config over the given glyphs with default delays.
pub fn config(symbols: &[&str]) -> GameConfig {
    GameConfig::new().with_symbols(symbols.iter().copied())
}

/// Game whose first round is dealt unshuffled: position `k` pairs with `k + n`.
pub fn ordered_game(symbols: &[&str], store: impl ScoreStore + 'static) -> MatchGame {
    let set = SymbolSet::new(symbols.iter().copied()).expect("symbols");
    let deck = DeckBuilder::new(&set).build_ordered();
    MatchGame::with_deck(config(symbols), 42, store, deck).expect("game")
}

/// Positions of each pair on the current board, in symbol order.
pub fn pairs(game: &MatchGame) -> Vec<(CardPos, CardPos)> {
    let mut by_symbol: Vec<Vec<CardPos>> = vec![Vec::new(); game.symbols().len()];
    for (i, card) in game.state().deck().iter().enumerate() {
        by_symbol[card.symbol.index()].push(CardPos::new(i));
    }
    by_symbol.into_iter().map(|p| (p[0], p[1])).collect()
}

/// Match every pair with no mistakes, letting each evaluation fire.
pub fn solve(game: &mut MatchGame) {
    let delay = game.config().reveal_delay_ms;
    for (a, b) in pairs(game) {
        game.reveal(a);
        game.reveal(b);
        game.advance(delay);
    }
}

/// Finish a fresh round so that the timer reads exactly `seconds`.
///
/// All but the last pair are matched right away; the last pair resolves
/// half a second after the `seconds`th tick.
pub fn win_in(game: &mut MatchGame, seconds: u64) {
    let delay = game.config().reveal_delay_ms;
    let start = game.now_ms();
    let all = pairs(game);
    let (last, rest) = all.split_last().expect("at least one pair");

    for &(a, b) in rest {
        game.reveal(a);
        game.reveal(b);
        game.advance(delay);
    }

    game.reveal(last.0);
    let reveal_at = start + seconds * 1000 + 500 - delay;
    assert!(game.now_ms() <= reveal_at, "round too short for {seconds}s");
    game.advance(reveal_at - game.now_ms());
    game.reveal(last.1);
    game.advance(delay);
}

/// Store whose every call fails.
#[derive(Debug, Default)]
pub struct BrokenStore;

impl ScoreStore for BrokenStore {
    fn load_best(&self, _key: &str) -> memory_match::Result<Option<u32>> {
        Err(MatchError::Io(std::io::Error::new(std::io::ErrorKind::Other, "unreadable")))
    }

    fn save_best(&mut self, _key: &str, _seconds: u32) -> memory_match::Result<()> {
        Err(MatchError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
    }

    fn clear(&mut self, _key: &str) -> memory_match::Result<()> {
        Ok(())
    }
}

pub fn memory() -> MemoryScoreStore {
    MemoryScoreStore::new()
}
