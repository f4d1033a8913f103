mod common;

use std::time::Duration;

use common::{shared, RecordingObserver, RecordingSink};
use shopbingo_engine::catalog::generate_cards;
use shopbingo_engine::collaborators::ManualScheduler;
use shopbingo_engine::errors::RoundError;
use shopbingo_engine::pattern::{evaluate, WinningPattern};
use shopbingo_engine::round::{
    format_round_id, Mode, Resolution, RoundConfig, RoundContext, RoundEngine, RoundPhase,
    TickOutcome,
};

fn context() -> RoundContext {
    RoundContext {
        round_id: format_round_id("20250301", 7),
        shop_id: Some("shop-1".into()),
    }
}

fn auto_engine(pattern: WinningPattern, seed: u64) -> RoundEngine {
    let cards = generate_cards(20, 11);
    let mut config = RoundConfig::new(pattern, [2, 5, 9]);
    config.mode = Mode::Auto;
    RoundEngine::new(config, context(), &cards, Some(seed)).expect("cards exist")
}

fn run_to_end(engine: &mut RoundEngine) -> TickOutcome {
    for _ in 0..=75 {
        let outcome = engine.tick();
        if matches!(outcome, TickOutcome::Resolved { .. }) {
            return outcome;
        }
    }
    panic!("round did not resolve within 76 ticks");
}

#[test]
fn round_id_is_date_and_sequence() {
    assert_eq!(format_round_id("20250301", 7), "20250301-000007");
}

#[test]
fn config_defaults_and_prize() {
    let config = RoundConfig::new(WinningPattern::All, [1, 2, 3]);
    assert_eq!(config.bet_per_card, 10);
    assert_eq!(config.interval(), Duration::from_secs(12));
    assert!((config.prize() - 24.0).abs() < 1e-9);
    assert!(config.validate().is_ok());
}

#[test]
fn total_cards_counts_distinct_selection() {
    let config = RoundConfig::new(WinningPattern::Cross, [4, 2, 4, 9]);
    assert_eq!(config.total_cards, 3);
    assert_eq!(config.selected_card_ids.len(), 3);
}

#[test]
fn config_validation_rejects_bad_values() {
    let mut config = RoundConfig::new(WinningPattern::All, Vec::new());
    assert!(matches!(config.validate(), Err(RoundError::InvalidConfig(_))));
    config.selected_card_ids.insert(1);
    config.bet_per_card = 0;
    assert!(config.validate().is_err());
    config.bet_per_card = 20;
    config.commission_rate = 1.5;
    assert!(config.validate().is_err());
    config.commission_rate = 1.0;
    assert!(config.validate().is_ok());
    assert_eq!(config.prize(), 0.0);
}

#[test]
fn config_reads_camel_case_json() {
    let json = r#"{"betPerCard":20,"commissionRate":0.1,"intervalMs":7000,
        "winningPattern":"Four Corners","totalCards":400,"selectedCardIds":[3,1,3]}"#;
    let config: RoundConfig = serde_json::from_str(json).expect("valid config");
    assert_eq!(config.winning_pattern, WinningPattern::FourCorners);
    assert_eq!(config.selected_card_ids.len(), 2);
    assert_eq!(config.mode, Mode::Manual);
    assert!((config.prize() - 36.0).abs() < 1e-9);
}

#[test]
fn unknown_selected_card_is_rejected_at_setup() {
    let cards = generate_cards(5, 1);
    let config = RoundConfig::new(WinningPattern::OneLine, [1, 42]);
    let err = RoundEngine::new(config, context(), &cards, None).unwrap_err();
    assert_eq!(err, RoundError::UnknownCard(42));
}

#[test]
fn auto_mode_resolves_with_every_matching_card() {
    let sink = shared(RecordingSink::default());
    let mut engine = auto_engine(WinningPattern::OneLine, 3).with_reporter(sink.clone());
    engine.start().unwrap();

    let TickOutcome::Resolved { call, result } = run_to_end(&mut engine) else {
        unreachable!()
    };
    assert!(call.is_some());
    assert_eq!(engine.phase(), RoundPhase::Resolved);
    assert_eq!(result.resolution, Resolution::AutoCheck);
    assert!(result.has_winner());
    assert_eq!(engine.result(), Some(&result));

    // every winner satisfies the pattern and every non-winner does not
    let called = *engine.called().set();
    for id in engine.selected_ids().collect::<Vec<_>>() {
        let grid = engine.grid(id).unwrap();
        let won = evaluate(WinningPattern::OneLine, grid, &called);
        assert_eq!(won.as_deref(), result.cells_for(id));
    }

    let submissions = &sink.borrow().submissions;
    assert_eq!(submissions.len(), result.winners.len());
    assert_eq!(submissions[0].round_id, "20250301-000007");
    assert_eq!(submissions[0].shop_id.as_deref(), Some("shop-1"));
    assert!((submissions[0].prize - 24.0).abs() < 1e-9);
}

#[test]
fn reporting_failure_does_not_revoke_the_win() {
    let sink = shared(RecordingSink {
        fail: true,
        ..Default::default()
    });
    let mut engine = auto_engine(WinningPattern::FourCorners, 8).with_reporter(sink.clone());
    engine.start().unwrap();
    let TickOutcome::Resolved { result, .. } = run_to_end(&mut engine) else {
        unreachable!()
    };
    assert!(result.has_winner());
    assert_eq!(engine.phase(), RoundPhase::Resolved);
    assert_eq!(sink.borrow().submissions.len(), result.winners.len());
}

#[test]
fn manual_mode_only_ends_by_exhaustion_without_checks() {
    let mut engine = auto_engine(WinningPattern::OneLine, 4);
    engine.set_mode(Mode::Manual).unwrap();
    engine.start().unwrap();
    for _ in 0..75 {
        assert!(matches!(engine.tick(), TickOutcome::Called(_)));
    }
    let TickOutcome::Resolved { call, result } = engine.tick() else {
        panic!("76th tick must resolve");
    };
    assert_eq!(call, None);
    assert_eq!(result.resolution, Resolution::Exhausted);
    assert!(result.winners.is_empty());
    assert_eq!(result.calls, 75);
}

#[test]
fn scheduler_follows_pause_resume_and_resolution() {
    let scheduler = shared(ManualScheduler::new());
    let mut engine = auto_engine(WinningPattern::FullHouse, 6).with_scheduler(scheduler.clone());
    assert_eq!(scheduler.borrow().armed(), None);

    engine.start().unwrap();
    assert_eq!(scheduler.borrow().armed(), Some(Duration::from_secs(12)));

    engine.tick();
    assert_eq!(engine.toggle_pause().unwrap(), RoundPhase::Paused);
    assert_eq!(scheduler.borrow().armed(), None);

    // a tick arriving while paused changes nothing
    let calls = engine.called().len();
    assert_eq!(engine.tick(), TickOutcome::Idle);
    assert_eq!(engine.called().len(), calls);

    assert_eq!(engine.toggle_pause().unwrap(), RoundPhase::Running);
    assert!(scheduler.borrow().armed().is_some());

    run_to_end(&mut engine);
    assert_eq!(scheduler.borrow().armed(), None);
}

#[test]
fn invalid_transitions_are_reported() {
    let mut engine = auto_engine(WinningPattern::OneLine, 1);
    assert!(matches!(
        engine.pause(),
        Err(RoundError::InvalidTransition {
            phase: RoundPhase::Configuring,
            action: "pause"
        })
    ));
    assert!(engine.resume().is_err());
    assert_eq!(engine.tick(), TickOutcome::Idle);
    engine.start().unwrap();
    assert!(engine.start().is_err());
    assert!(engine.resume().is_err());
}

#[test]
fn restart_clears_round_and_keeps_cards() {
    let scheduler = shared(ManualScheduler::new());
    let mut engine = auto_engine(WinningPattern::OneLine, 12).with_scheduler(scheduler.clone());
    engine.start().unwrap();
    run_to_end(&mut engine);
    assert!(engine.set_mode(Mode::Manual).is_err());

    engine.restart();
    assert_eq!(engine.phase(), RoundPhase::Configuring);
    assert!(engine.called().is_empty());
    assert_eq!(engine.result(), None);
    assert_eq!(engine.selected_ids().collect::<Vec<_>>(), vec![2, 5, 9]);
    assert_eq!(scheduler.borrow().armed(), None);
    assert_eq!(engine.tick(), TickOutcome::Idle);

    let next = RoundContext {
        round_id: format_round_id("20250301", 8),
        shop_id: None,
    };
    engine.set_context(next.clone()).unwrap();
    engine.start().unwrap();
    assert_eq!(engine.context(), &next);
    assert!(engine.set_context(context()).is_err());
    assert!(matches!(engine.tick(), TickOutcome::Called(_)));
}

#[test]
fn observer_sees_each_call_and_the_result() {
    let observer = shared(RecordingObserver::default());
    let mut engine = auto_engine(WinningPattern::TwoLines, 21).with_observer(observer.clone());
    engine.start().unwrap();
    let TickOutcome::Resolved { result, .. } = run_to_end(&mut engine) else {
        unreachable!()
    };

    let observed = observer.borrow();
    assert_eq!(observed.updates.len(), result.calls);
    for (i, update) in observed.updates.iter().enumerate() {
        assert_eq!(update.calls_made, i + 1);
        assert_eq!(update.recent.first(), Some(&update.call.number));
        assert!(update.recent.len() <= 5);
    }
    assert_eq!(observed.resolved, vec![result]);
}
