mod common;

use common::{sample_card, shared, RecordingObserver, RecordingSink};
use shopbingo_engine::catalog::generate_cards;
use shopbingo_engine::errors::CheckError;
use shopbingo_engine::pattern::{evaluate, WinningPattern};
use shopbingo_engine::round::{
    CheckOutcome, Mode, Resolution, RoundConfig, RoundContext, RoundEngine, RoundPhase,
    TickOutcome,
};

fn manual_engine(pattern: WinningPattern) -> RoundEngine {
    let cards = generate_cards(10, 77);
    let config = RoundConfig::new(pattern, [1, 4, 7]);
    let ctx = RoundContext {
        round_id: "20250301-000001".into(),
        shop_id: None,
    };
    RoundEngine::new(config, ctx, &cards, Some(31)).unwrap()
}

fn tick_until_satisfied(engine: &mut RoundEngine, card_id: u32) {
    let pattern = engine.config().winning_pattern;
    for _ in 0..75 {
        let grid = engine.grid(card_id).unwrap();
        if evaluate(pattern, grid, engine.called().set()).is_some() {
            return;
        }
        assert!(matches!(engine.tick(), TickOutcome::Called(_)));
    }
}

#[test]
fn check_before_any_call_fails() {
    let mut engine = manual_engine(WinningPattern::OneLine);
    engine.start().unwrap();
    assert_eq!(engine.check_card(1), Err(CheckError::NoCalledNumbers));
    assert_eq!(engine.phase(), RoundPhase::Running);
}

#[test]
fn check_of_unselected_card_leaves_round_untouched() {
    let mut engine = manual_engine(WinningPattern::OneLine);
    engine.start().unwrap();
    engine.tick();
    engine.tick();
    let before = engine.called().clone();

    assert_eq!(engine.check_card(2), Err(CheckError::CardNotFound(2)));
    assert_eq!(engine.called(), &before);
    assert_eq!(engine.phase(), RoundPhase::Running);
    assert!(engine.failed_checks().is_empty());
}

#[test]
fn failed_check_is_recorded_and_round_continues() {
    let observer = shared(RecordingObserver::default());
    let mut engine = manual_engine(WinningPattern::FullHouse).with_observer(observer.clone());
    engine.start().unwrap();
    engine.tick();

    let outcome = engine.check_card(4).unwrap();
    let CheckOutcome::Miss(miss) = outcome else {
        panic!("one call cannot complete a full house");
    };
    assert_eq!(miss.card_id, 4);
    assert_eq!(miss.calls, 1);
    assert_eq!(engine.failed_checks(), &[4]);
    assert_eq!(engine.phase(), RoundPhase::Running);
    assert_eq!(observer.borrow().misses, vec![miss]);
    assert!(matches!(engine.tick(), TickOutcome::Called(_)));
}

#[test]
fn successful_check_resolves_with_single_winner() {
    let sink = shared(RecordingSink::default());
    let mut engine = manual_engine(WinningPattern::OneLine).with_reporter(sink.clone());
    engine.start().unwrap();
    tick_until_satisfied(&mut engine, 7);

    let CheckOutcome::Bingo(result) = engine.check_card(7).unwrap() else {
        panic!("card 7 satisfies the pattern");
    };
    assert_eq!(result.resolution, Resolution::ManualCheck);
    assert_eq!(result.winner_ids(), vec![7]);
    let cells = result.cells_for(7).expect("winner cells");
    assert!(cells.len() >= 5);
    let grid = engine.grid(7).unwrap();
    assert!(cells.iter().all(|c| grid.is_marked_at(*c, engine.called().set())));
    assert_eq!(engine.phase(), RoundPhase::Resolved);
    assert_eq!(sink.borrow().submissions.len(), 1);
    assert_eq!(sink.borrow().submissions[0].card_id, 7);

    assert_eq!(
        engine.check_card(7),
        Err(CheckError::RoundNotActive(RoundPhase::Resolved))
    );
    assert_eq!(engine.tick(), TickOutcome::Idle);
}

#[test]
fn check_is_allowed_while_paused() {
    let mut engine = manual_engine(WinningPattern::OneLine);
    engine.start().unwrap();
    tick_until_satisfied(&mut engine, 1);
    engine.pause().unwrap();
    assert!(matches!(engine.check_card(1), Ok(CheckOutcome::Bingo(_))));
}

#[test]
fn check_works_in_auto_mode_too() {
    let cards = vec![sample_card(1)];
    let mut config = RoundConfig::new(WinningPattern::FullHouse, [1]);
    config.mode = Mode::Auto;
    let ctx = RoundContext {
        round_id: "r".into(),
        shop_id: None,
    };
    let mut engine = RoundEngine::new(config, ctx, &cards, Some(2)).unwrap();
    engine.start().unwrap();
    engine.tick();
    assert!(matches!(engine.check_card(1), Ok(CheckOutcome::Miss(_))));
}
