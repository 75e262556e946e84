//! Round lifecycle tests: reveal, resolve, complete, reset.
//!
//! Boards are dealt unshuffled so positions are predictable: with three
//! symbols, position `k` pairs with position `k + 3`.

mod common;

use common::{init_tracing, memory, ordered_game, pairs, solve, THREE};
use memory_match::{
    CardPos, GameConfig, GameEvent, IgnoreReason, MatchGame, RevealOutcome, RoundPhase,
};

fn pos(i: usize) -> CardPos {
    CardPos::new(i)
}

// =============================================================================
// Scenario
// =============================================================================

/// 3 symbols → 6 cards; 0 & 3 match, then mistakes, then the rest.
#[test]
fn test_three_symbol_scenario() {
    init_tracing();
    let mut game = ordered_game(&THREE, memory());

    game.reveal(pos(0));
    game.reveal(pos(3));
    game.advance(600);

    assert!(game.state().card(pos(0)).unwrap().matched);
    assert!(game.state().card(pos(3)).unwrap().matched);
    assert_eq!(game.state().move_count(), 2);
    assert_eq!(game.state().matched_count(), 2);

    // Two mismatches
    game.reveal(pos(1));
    game.reveal(pos(2));
    game.advance(1200);
    game.reveal(pos(4));
    game.reveal(pos(2));
    game.advance(1200);
    assert_eq!(game.state().matched_count(), 2);
    assert!(game.state().deck().iter().filter(|c| !c.matched).all(|c| !c.face_up));

    game.reveal(pos(1));
    game.reveal(pos(4));
    game.advance(600);
    assert_eq!(game.state().matched_count(), 4);
    assert!(!game.state().is_complete());

    game.reveal(pos(2));
    game.reveal(pos(5));
    game.advance(600);

    assert!(game.state().is_complete());
    assert_eq!(game.state().matched_count(), 6);
    assert_eq!(game.state().move_count(), 10);
    assert_eq!(game.outcome().unwrap().move_count, 10);
}

// =============================================================================
// Reveal Rules
// =============================================================================

#[test]
fn test_reveal_matched_card_is_noop() {
    let mut game = ordered_game(&THREE, memory());
    game.reveal(pos(0));
    game.reveal(pos(3));
    game.advance(600);

    let before = game.state().clone();
    assert_eq!(
        game.reveal(pos(0)),
        RevealOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    assert_eq!(game.state(), &before);
    assert_eq!(game.state().move_count(), 2);
}

#[test]
fn test_revealed_never_exceeds_two() {
    let mut game = ordered_game(&THREE, memory());

    for i in 0..6 {
        game.reveal(pos(i));
        assert!(game.state().revealed().len() <= 2);
    }
    assert_eq!(game.state().revealed(), &[pos(0), pos(1)]);
    assert_eq!(game.state().move_count(), 2);
}

#[test]
fn test_mismatched_cards_blocked_until_concealed() {
    let mut game = ordered_game(&THREE, memory());
    game.reveal(pos(0));
    game.reveal(pos(1));
    game.advance(600);

    // Other cards can be picked while the mismatch is still showing
    assert!(game.reveal(pos(2)).is_accepted());
    assert_eq!(
        game.reveal(pos(1)),
        RevealOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
    );

    game.advance(600);
    assert!(!game.state().card(pos(0)).unwrap().face_up);
    assert!(!game.state().card(pos(1)).unwrap().face_up);
    assert!(game.state().card(pos(2)).unwrap().face_up);
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn test_completion_stops_timer_and_signals_once() {
    let mut game = ordered_game(&THREE, memory());
    game.reveal(pos(0));
    game.advance(2000);
    solve(&mut game);

    assert_eq!(game.state().phase(), RoundPhase::Complete);
    let elapsed = game.state().elapsed_seconds();

    game.advance(60_000);
    assert_eq!(game.state().elapsed_seconds(), elapsed);

    // Further input changes nothing and emits nothing new
    game.reveal(pos(0));
    game.advance(60_000);

    let events = game.drain_events();
    let wins: Vec<_> = events.iter().filter(|e| e.event.is_win()).collect();
    assert_eq!(wins.len(), 1);
    match &wins[0].event {
        GameEvent::RoundWon(outcome) => {
            assert_eq!(outcome.elapsed_seconds, elapsed);
            assert_eq!(outcome.move_count, game.state().move_count());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_celebration_window() {
    let mut game = ordered_game(&["a"], memory());
    game.reveal(pos(0));
    game.reveal(pos(1));
    game.advance(600);
    assert!(game.view().celebrating());
    assert!(game.view().play_again_visible());
    assert_eq!(game.view().result_message(), "🎉 You won in 0 seconds with 2 moves!");

    game.advance(2999);
    assert!(game.is_celebrating());
    game.advance(1);
    assert!(!game.is_celebrating());

    let events: Vec<_> = game.drain_events().into_iter().map(|e| (e.at_ms, e.event)).collect();
    assert!(events.contains(&(600, GameEvent::CelebrationStarted)));
    assert!(events.contains(&(3600, GameEvent::CelebrationEnded)));
}

#[test]
fn test_events_in_time_order() {
    let mut game = MatchGame::new(GameConfig::new(), 5, memory()).unwrap();
    game.advance(700);
    solve(&mut game);
    game.advance(5000);

    let events = game.drain_events();
    assert!(events.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
    assert!(matches!(events[0].event, GameEvent::RoundStarted { round: 1 }));
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_reset_after_completion() {
    let mut game = MatchGame::new(GameConfig::new(), 9, memory()).unwrap();
    let first_deck = game.state().deck().clone();
    game.reveal(pairs(&game)[0].0);
    game.advance(3000);
    solve(&mut game);
    assert!(game.state().is_complete());

    assert!(game.play_again());

    let state = game.state();
    assert_eq!(state.phase(), RoundPhase::Idle);
    assert_eq!(state.move_count(), 0);
    assert_eq!(state.elapsed_seconds(), 0);
    assert_eq!(state.matched_count(), 0);
    assert_eq!(state.len(), 12);
    assert!(state.deck().iter().all(|c| !c.face_up && !c.matched));
    assert_ne!(state.deck(), &first_deck);
    assert!(game.outcome().is_none());
    assert!(!game.view().play_again_visible());
    assert_eq!(game.view().result_message(), "");
}

#[test]
fn test_reset_mid_round_discards_stale_timers() {
    let mut game = ordered_game(&THREE, memory());
    game.reveal(pos(0));
    game.reveal(pos(1));
    game.advance(600);
    // Mismatch conceal and tick are pending
    assert_eq!(game.scheduler().len(), 2);

    game.reset();
    let fresh = pairs(&game);
    game.reveal(fresh[0].0);
    game.advance(700);

    // The stale conceal would have fired at 1200 had it survived
    assert!(game.state().card(fresh[0].0).unwrap().face_up);
    assert_eq!(game.state().elapsed_seconds(), 0);
    game.advance(300);
    assert_eq!(game.state().elapsed_seconds(), 1);
}

#[test]
fn test_seed_fixes_every_round() {
    let mut a = MatchGame::new(GameConfig::new(), 77, memory()).unwrap();
    let mut b = MatchGame::new(GameConfig::new(), 77, memory()).unwrap();

    for _ in 0..3 {
        assert_eq!(a.state().deck(), b.state().deck());
        a.reset();
        b.reset();
    }
}
