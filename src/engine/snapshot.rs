//! Suspend and resume a round.
//!
//! A snapshot captures everything but the score store and undrained events:
//! the round, pending timers with their due times, the RNG position and the
//! virtual clock. Restoring continues exactly where the round left off.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::controller::{check_deck, MatchGame};
use crate::cards::SymbolSet;
use crate::core::{ActionRecord, GameConfig, GameRng, GameRngState};
use crate::error::{MatchError, Result};
use crate::events::RoundOutcome;
use crate::round::RoundState;
use crate::schedule::{Scheduler, TaskId};
use crate::score::{BestScore, ScoreStore};

/// Serializable form of a `MatchGame`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub rng: GameRngState,
    pub state: RoundState,
    pub scheduler: Scheduler,
    pub best: BestScore,
    pub now_ms: u64,
    pub round: u32,
    pub tick_task: Option<TaskId>,
    pub outcome: Option<RoundOutcome>,
    pub celebrating: bool,
    pub history: Vector<ActionRecord>,
}

impl MatchGame {
    /// Capture the game.
    #[must_use]
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            rng: self.rng.state(),
            state: self.state.clone(),
            scheduler: self.scheduler.clone(),
            best: self.best,
            now_ms: self.now_ms,
            round: self.round,
            tick_task: self.tick_task,
            outcome: self.outcome,
            celebrating: self.celebrating,
            history: self.history.clone(),
        }
    }

    /// Capture the game as bincode bytes.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.to_snapshot())?)
    }

    /// Rebuild a game from a snapshot.
    ///
    /// The best time is the lower of the store's record and the snapshot's.
    /// A better snapshot record is written back to the store.
    pub fn from_snapshot(snapshot: GameSnapshot, store: impl ScoreStore + 'static) -> Result<Self> {
        snapshot.config.validate()?;
        let symbols = SymbolSet::new(snapshot.config.symbols.iter().cloned())?;
        check_round(&symbols, &snapshot.state).map_err(MatchError::CorruptSnapshot)?;

        let mut store: Box<dyn ScoreStore> = Box::new(store);
        let key = &snapshot.config.best_score_key;
        let best = match store.load_best(key) {
            Ok(stored) => {
                let stored = BestScore::from_stored(stored);
                let best = stored.merge(snapshot.best);
                if let Some(seconds) = best.seconds().filter(|_| best != stored) {
                    if let Err(err) = store.save_best(key, seconds) {
                        tracing::warn!(%err, "failed to persist restored best time");
                    }
                }
                best
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load best time, keeping snapshot value");
                snapshot.best
            }
        };

        tracing::debug!(
            round = snapshot.round,
            now_ms = snapshot.now_ms,
            pending = snapshot.scheduler.len(),
            "restoring snapshot"
        );

        Ok(Self {
            config: snapshot.config,
            symbols,
            rng: GameRng::from_state(&snapshot.rng),
            state: snapshot.state,
            scheduler: snapshot.scheduler,
            store,
            best,
            now_ms: snapshot.now_ms,
            round: snapshot.round,
            tick_task: snapshot.tick_task,
            outcome: snapshot.outcome,
            celebrating: snapshot.celebrating,
            history: snapshot.history,
            events: Vec::new(),
        })
    }

    /// Rebuild a game from bincode bytes.
    ///
    /// Bytes that decode to an impossible round are rejected with
    /// [`MatchError::CorruptSnapshot`].
    pub fn restore(bytes: &[u8], store: impl ScoreStore + 'static) -> Result<Self> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        Self::from_snapshot(snapshot, store)
    }
}

/// A decoded round must be one the engine could have reached.
fn check_round(symbols: &SymbolSet, state: &RoundState) -> std::result::Result<(), String> {
    check_deck(symbols, state.deck())?;

    let revealed = state.revealed();
    if revealed.len() > 2 {
        return Err(format!("{} cards awaiting evaluation", revealed.len()));
    }
    if revealed.len() == 2 && revealed[0] == revealed[1] {
        return Err(format!("{} revealed twice", revealed[0]));
    }
    for &pos in revealed {
        if !state.card(pos).is_some_and(|card| card.is_pending()) {
            return Err(format!("revealed {pos} is not a face-up unmatched card"));
        }
    }

    let matched = state.deck().iter().filter(|card| card.matched).count();
    if matched != state.matched_count() {
        return Err(format!(
            "matched count {} but {matched} matched cards",
            state.matched_count()
        ));
    }
    if state.is_complete() != (matched == state.len()) {
        return Err("phase disagrees with matched cards".into());
    }
    Ok(())
}
