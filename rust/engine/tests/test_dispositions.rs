use shopbingo_engine::catalog::generate_cards;
use shopbingo_engine::errors::CheckError;
use shopbingo_engine::pattern::{evaluate, WinningPattern};
use shopbingo_engine::round::{
    CheckOutcome, Disposition, DispositionPolicy, Mode, Resolution, RoundConfig, RoundContext, RoundEngine,
    TickOutcome,
};

fn engine_with(policy: DispositionPolicy, selected: &[u32]) -> RoundEngine {
    let cards = generate_cards(6, 5);
    let mut config = RoundConfig::new(WinningPattern::OneLine, selected.iter().copied());
    config.disposition_policy = policy;
    let ctx = RoundContext {
        round_id: "20250301-000002".into(),
        shop_id: None,
    };
    RoundEngine::new(config, ctx, &cards, Some(99)).unwrap()
}

fn satisfied(engine: &RoundEngine, card_id: u32) -> bool {
    let grid = engine.grid(card_id).unwrap();
    evaluate(engine.config().winning_pattern, grid, engine.called().set()).is_some()
}

#[test]
fn explicit_sweep_locks_only_after_another_call() {
    let mut engine = engine_with(DispositionPolicy::Disabled, &[3]);
    engine.start().unwrap();
    while !satisfied(&engine, 3) {
        engine.tick();
    }
    // disabled policy never sweeps on its own
    assert_eq!(engine.disposition(3), Disposition::Clear);

    assert_eq!(engine.sweep_dispositions(), vec![(3, Disposition::Passed)]);
    // no new call since the card was passed
    assert!(engine.sweep_dispositions().is_empty());
    assert_eq!(engine.disposition(3), Disposition::Passed);

    assert!(matches!(engine.tick(), TickOutcome::Called(_)));
    assert_eq!(engine.sweep_dispositions(), vec![(3, Disposition::Locked)]);
    assert!(engine.sweep_dispositions().is_empty());
    assert_eq!(engine.cards_with(Disposition::Locked), vec![3]);
    assert_eq!(engine.check_card(3), Err(CheckError::CardLocked(3)));
}

#[test]
fn unclaimed_card_is_locked_one_call_later() {
    let mut engine = engine_with(DispositionPolicy::LockAfterNextCall, &[2]);
    engine.start().unwrap();
    while !satisfied(&engine, 2) {
        engine.tick();
    }
    assert_eq!(engine.disposition(2), Disposition::Passed);

    // still claimable before the next draw
    let calls = engine.called().len();
    engine.tick();
    assert_eq!(engine.called().len(), calls + 1);
    assert_eq!(engine.disposition(2), Disposition::Locked);
    assert_eq!(engine.check_card(2), Err(CheckError::CardLocked(2)));
}

#[test]
fn passed_card_can_still_win_when_claimed() {
    let mut engine = engine_with(DispositionPolicy::LockAfterNextCall, &[4]);
    engine.start().unwrap();
    while !satisfied(&engine, 4) {
        engine.tick();
    }
    assert_eq!(engine.disposition(4), Disposition::Passed);
    assert!(matches!(engine.check_card(4), Ok(CheckOutcome::Bingo(_))));
}

#[test]
fn locked_card_never_wins_in_auto_mode() {
    let mut engine = engine_with(DispositionPolicy::LockAfterNextCall, &[1]);
    engine.start().unwrap();
    while engine.disposition(1) != Disposition::Locked {
        assert!(matches!(engine.tick(), TickOutcome::Called(_)));
    }

    engine.set_mode(Mode::Auto).unwrap();
    let result = loop {
        if let TickOutcome::Resolved { result, .. } = engine.tick() {
            break result;
        }
    };
    assert_eq!(result.resolution, Resolution::Exhausted);
    assert!(result.winners.is_empty());
}

#[test]
fn restart_clears_dispositions() {
    let mut engine = engine_with(DispositionPolicy::Disabled, &[6]);
    engine.start().unwrap();
    while !satisfied(&engine, 6) {
        engine.tick();
    }
    engine.sweep_dispositions();
    engine.restart();
    assert_eq!(engine.disposition(6), Disposition::Clear);
    assert!(engine.cards_with(Disposition::Passed).is_empty());
}
