//! The round controller.
//!
//! `MatchGame` owns one round at a time: the dealt deck, the pending timers,
//! the best time and its store. Hosts call [`MatchGame::reveal`] on input,
//! [`MatchGame::advance`] from their frame or timer loop, and
//! [`MatchGame::drain_events`] to learn what to draw.
//!
//! ```
//! use memory_match::{CardPos, GameConfig, MatchGame, MemoryScoreStore};
//!
//! let config = GameConfig::new().with_symbols(["🍎"]);
//! let mut game = MatchGame::new(config, 42, MemoryScoreStore::new()).unwrap();
//!
//! game.reveal(CardPos::new(0));
//! game.reveal(CardPos::new(1));
//! game.advance(600);
//!
//! assert!(game.state().is_complete());
//! assert_eq!(game.outcome().map(|o| o.move_count), Some(2));
//! ```

use im::Vector;

use crate::cards::{Card, CardPos, DeckBuilder, SymbolSet};
use crate::core::{Action, ActionRecord, GameConfig, GameRng};
use crate::error::{MatchError, Result};
use crate::events::{GameEvent, RoundOutcome, TimedEvent};
use crate::round::{Resolution, RevealOutcome, RoundState};
use crate::schedule::{ScheduledTask, Scheduler, TaskId, TaskKind};
use crate::score::{BestScore, ScoreStore};
use crate::view::BoardView;

/// Memory-match round controller.
pub struct MatchGame {
    pub(crate) config: GameConfig,
    pub(crate) symbols: SymbolSet,
    pub(crate) rng: GameRng,
    pub(crate) state: RoundState,
    pub(crate) scheduler: Scheduler,
    pub(crate) store: Box<dyn ScoreStore>,
    pub(crate) best: BestScore,
    pub(crate) now_ms: u64,
    pub(crate) round: u32,
    pub(crate) tick_task: Option<TaskId>,
    pub(crate) outcome: Option<RoundOutcome>,
    pub(crate) celebrating: bool,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) events: Vec<TimedEvent>,
}

impl MatchGame {
    /// Create a game and deal the first round.
    ///
    /// The best time is read from `store`; a store that fails to load is
    /// treated as having no record.
    pub fn new(config: GameConfig, seed: u64, store: impl ScoreStore + 'static) -> Result<Self> {
        config.validate()?;
        let symbols = SymbolSet::new(config.symbols.iter().cloned())?;
        let mut rng = GameRng::new(seed);
        let deck = Self::deal(&mut rng, &symbols);
        Ok(Self::assemble(config, symbols, rng, deck, Box::new(store)))
    }

    /// Create a game whose first round uses `deck` as dealt.
    ///
    /// Later rounds are shuffled as usual. The deck must hold every symbol of
    /// the config exactly twice.
    pub fn with_deck(
        config: GameConfig,
        seed: u64,
        store: impl ScoreStore + 'static,
        deck: Vec<Card>,
    ) -> Result<Self> {
        config.validate()?;
        let symbols = SymbolSet::new(config.symbols.iter().cloned())?;
        check_deck(&symbols, &deck).map_err(MatchError::InvalidConfig)?;
        let mut rng = GameRng::new(seed);
        // Consume the first fork so reset deals the same decks as `new`.
        let _ = rng.fork();
        Ok(Self::assemble(config, symbols, rng, deck, Box::new(store)))
    }

    fn assemble(
        config: GameConfig,
        symbols: SymbolSet,
        rng: GameRng,
        deck: Vec<Card>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let best = load_best(store.as_ref(), &config.best_score_key);
        tracing::info!(
            cards = deck.len(),
            best = ?best.seconds(),
            "memory match ready"
        );
        Self {
            config,
            symbols,
            rng,
            state: RoundState::new(deck),
            scheduler: Scheduler::new(),
            store,
            best,
            now_ms: 0,
            round: 1,
            tick_task: None,
            outcome: None,
            celebrating: false,
            history: Vector::new(),
            events: Vec::new(),
        }
    }

    /// Each round deals from its own fork of the session RNG.
    fn deal(rng: &mut GameRng, symbols: &SymbolSet) -> Vec<Card> {
        let mut round_rng = rng.fork();
        DeckBuilder::new(symbols).build(&mut round_rng)
    }

    // === Read access ===

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Glyphs for symbol ids.
    #[must_use]
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Current round.
    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Best time on record.
    #[must_use]
    pub fn best(&self) -> BestScore {
        self.best
    }

    /// Final numbers of the current round once it is won.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Virtual time in ms since the game was created.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Round number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Inputs applied this round.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Pending timers.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether the win celebration is up.
    #[must_use]
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Everything a renderer needs.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            state: &self.state,
            symbols: &self.symbols,
            best: self.best,
            outcome: self.outcome,
            celebrating: self.celebrating,
        }
    }

    /// Events since the last drain.
    #[must_use]
    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }

    // === Input ===

    /// Route a host action. Returns whether it changed anything.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Reveal(pos) => self.reveal(pos).is_accepted(),
            Action::Advance { ms } => self.advance(ms) > 0,
            Action::PlayAgain => self.play_again(),
            Action::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Turn a card face up.
    ///
    /// The first reveal starts the timer. The second schedules evaluation
    /// after the reveal delay. Ignored reveals change nothing.
    pub fn reveal(&mut self, pos: CardPos) -> RevealOutcome {
        let outcome = self.state.reveal(pos);
        self.record(Action::Reveal(pos), outcome.is_accepted());

        let (started_round, pair_ready) = match outcome {
            RevealOutcome::Ignored(reason) => {
                tracing::debug!(%pos, ?reason, "reveal ignored");
                return outcome;
            }
            RevealOutcome::Revealed {
                started_round,
                pair_ready,
            } => (started_round, pair_ready),
        };

        if started_round {
            self.start_timer();
            tracing::info!(round = self.round, "round started");
            self.emit(GameEvent::RoundStarted { round: self.round });
        }

        if let Some(card) = self.state.card(pos) {
            tracing::debug!(%pos, symbol = %card.symbol, moves = self.state.move_count(), "card revealed");
            let symbol = card.symbol;
            self.emit(GameEvent::CardRevealed { pos, symbol });
        }

        if pair_ready {
            let due = self.now_ms.saturating_add(self.config.reveal_delay_ms);
            self.scheduler.schedule(due, TaskKind::Evaluate);
        }

        outcome
    }

    /// Let `ms` of virtual time pass, firing due timers in order.
    ///
    /// Consecutive timer periods with nothing else due in between are
    /// applied in one step, so any jump costs a bounded number of tasks.
    /// Returns the number of tasks fired, counting every timer period.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.now_ms.saturating_add(ms);
        let mut fired = 0usize;
        while let Some(task) = self.scheduler.pop_due(target) {
            self.now_ms = self.now_ms.max(task.due_ms);
            let periods = self.fire(task, target);
            fired = fired.saturating_add(usize::try_from(periods).unwrap_or(usize::MAX));
        }
        self.now_ms = target;
        fired
    }

    /// Start the next round, but only once this one is won.
    pub fn play_again(&mut self) -> bool {
        if !self.state.is_complete() {
            self.record(Action::PlayAgain, false);
            return false;
        }
        self.reset();
        true
    }

    /// Cancel every pending timer and deal a fresh round.
    pub fn reset(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.tick_task = None;

        if self.celebrating {
            self.celebrating = false;
            self.emit(GameEvent::CelebrationEnded);
        }

        let deck = Self::deal(&mut self.rng, &self.symbols);
        self.state = RoundState::new(deck);
        self.outcome = None;
        self.history = Vector::new();
        self.round += 1;

        tracing::info!(round = self.round, cancelled, "round reset");
        self.emit(GameEvent::RoundReset { round: self.round });
    }

    /// Forget the best time, here and in the store.
    pub fn clear_best(&mut self) -> Result<()> {
        self.store.clear(&self.config.best_score_key)?;
        self.best = BestScore::none();
        Ok(())
    }

    // === Timers ===

    fn start_timer(&mut self) {
        if let Some(old) = self.tick_task.take() {
            self.scheduler.cancel(old);
        }
        let due = self.now_ms.saturating_add(self.config.tick_interval_ms);
        self.tick_task = Some(self.scheduler.schedule(due, TaskKind::Tick));
    }

    /// Fire the tick due at `first_due` plus every later period up to
    /// `target` that no other task falls between. Returns the periods run.
    fn fire_ticks(&mut self, first_due: u64, target: u64) -> u64 {
        self.tick_task = None;
        let interval = self.config.tick_interval_ms.max(1);

        // A task pending at the same due time as a rescheduled tick has the
        // lower id, so it fires first.
        let horizon = match self.scheduler.next_due() {
            Some(next) => target.min(next.saturating_sub(1)),
            None => target,
        };
        let periods = if horizon > first_due {
            (horizon - first_due) / interval + 1
        } else {
            1
        };
        let last_due = first_due.saturating_add((periods - 1).saturating_mul(interval));
        self.now_ms = self.now_ms.max(last_due);

        if self.state.tick_by(periods) {
            let elapsed_seconds = self.state.elapsed_seconds();
            self.emit(GameEvent::TimerTick { elapsed_seconds });
            // Keep cadence from the due time, not from when advance ran.
            // Past the end of the clock the timer simply stops.
            if let Some(due) = last_due.checked_add(interval) {
                self.tick_task = Some(self.scheduler.schedule(due, TaskKind::Tick));
            }
        }
        periods
    }

    /// Run one popped task. Returns the timer periods it covered, 1 for
    /// anything else.
    fn fire(&mut self, task: ScheduledTask, target: u64) -> u64 {
        match task.kind {
            TaskKind::Tick => return self.fire_ticks(task.due_ms, target),
            TaskKind::Evaluate => self.resolve_pair(),
            TaskKind::Conceal(positions) => {
                let flipped = self.state.conceal(&positions);
                if !flipped.is_empty() {
                    self.emit(GameEvent::CardsConcealed {
                        positions: flipped.to_vec(),
                    });
                }
            }
            TaskKind::EndCelebration => {
                if self.celebrating {
                    self.celebrating = false;
                    self.emit(GameEvent::CelebrationEnded);
                }
            }
        }
        1
    }

    fn resolve_pair(&mut self) {
        match self.state.evaluate() {
            Some(Resolution::Matched {
                first,
                second,
                round_complete,
            }) => {
                tracing::debug!(%first, %second, "pair matched");
                self.emit(GameEvent::PairMatched {
                    first,
                    second,
                    matched_count: self.state.matched_count(),
                });
                if round_complete {
                    self.finish_round();
                }
            }
            Some(Resolution::Mismatched { first, second }) => {
                tracing::debug!(%first, %second, "pair mismatched");
                self.emit(GameEvent::PairMismatched { first, second });
                let due = self.now_ms.saturating_add(self.config.mismatch_delay_ms);
                self.scheduler
                    .schedule(due, TaskKind::Conceal([first, second].into_iter().collect()));
            }
            None => {}
        }
    }

    fn finish_round(&mut self) {
        if let Some(tick) = self.tick_task.take() {
            self.scheduler.cancel(tick);
        }

        let elapsed_seconds = self.state.elapsed_seconds();
        let move_count = self.state.move_count();
        let new_best = self.best.record(elapsed_seconds);
        if new_best {
            if let Err(err) = self.store.save_best(&self.config.best_score_key, elapsed_seconds) {
                tracing::warn!(%err, "failed to persist best time");
            }
        }

        let outcome = RoundOutcome {
            elapsed_seconds,
            move_count,
            best_seconds: self.best.seconds(),
            new_best,
        };
        self.outcome = Some(outcome);
        tracing::info!(
            round = self.round,
            elapsed_seconds,
            move_count,
            new_best,
            "round won"
        );

        self.emit(GameEvent::RoundWon(outcome));
        self.celebrating = true;
        self.emit(GameEvent::CelebrationStarted);
        let due = self.now_ms.saturating_add(self.config.celebration_ms);
        self.scheduler.schedule(due, TaskKind::EndCelebration);
    }

    // === Bookkeeping ===

    fn emit(&mut self, event: GameEvent) {
        self.events.push(TimedEvent {
            at_ms: self.now_ms,
            event,
        });
    }

    fn record(&mut self, action: Action, accepted: bool) {
        let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.history
            .push_back(ActionRecord::new(sequence, self.now_ms, action, accepted));
    }
}

impl std::fmt::Debug for MatchGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchGame")
            .field("round", &self.round)
            .field("now_ms", &self.now_ms)
            .field("phase", &self.state.phase())
            .field("moves", &self.state.move_count())
            .field("matched", &self.state.matched_count())
            .field("pending_tasks", &self.scheduler.len())
            .finish()
    }
}

fn load_best(store: &dyn ScoreStore, key: &str) -> BestScore {
    match store.load_best(key) {
        Ok(stored) => BestScore::from_stored(stored),
        Err(err) => {
            tracing::warn!(%err, key, "failed to load best time, starting without a record");
            BestScore::none()
        }
    }
}

/// Every symbol of the set exactly twice, nothing else.
pub(super) fn check_deck<'a>(
    symbols: &SymbolSet,
    deck: impl IntoIterator<Item = &'a Card>,
) -> std::result::Result<(), String> {
    let mut counts = vec![0usize; symbols.len()];
    for card in deck {
        match counts.get_mut(card.symbol.index()) {
            Some(count) => *count += 1,
            None => return Err(format!("deck card {} has unknown {}", card.id, card.symbol)),
        }
    }
    if counts.iter().any(|&c| c != 2) {
        return Err("deck must hold every symbol exactly twice".into());
    }
    Ok(())
}
