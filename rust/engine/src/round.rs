use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::announce::Language;
use crate::called::CalledNumbers;
use crate::caller::{Call, NumberCaller};
use crate::card::{BingoCard, CardGrid, CardId, Coord};
use crate::collaborators::{
    Announcer, ManualScheduler, NullObserver, NullReportSink, ReportingSink, RoundObserver,
    Scheduler, SilentAnnouncer, WinningSubmission,
};
use crate::errors::{CheckError, RoundError};
use crate::pattern::{evaluate, WinningPattern};

/// Number of calls shown in the "last calls" strip.
pub const RECENT_CALLS: usize = 5;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every call is followed by a win check over all selected cards.
    Auto,
    /// Wins are only declared through [`RoundEngine::check_card`].
    #[default]
    Manual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Configuring,
    Running,
    Paused,
    Resolved,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Configuring => "configuring",
            RoundPhase::Running => "running",
            RoundPhase::Paused => "paused",
            RoundPhase::Resolved => "resolved",
        };
        f.write_str(s)
    }
}

/// Anti-abuse bookkeeping for cards that qualified without being claimed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    #[default]
    Clear,
    /// Qualified once without a claim; still eligible.
    Passed,
    /// Qualified again after being passed; barred from winning this round.
    Locked,
}

/// When the disposition sweep runs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispositionPolicy {
    /// Only explicit calls to [`RoundEngine::sweep_dispositions`].
    #[default]
    Disabled,
    /// In manual mode, sweep after every draw: a qualifying card must be claimed before
    /// the next number is drawn or it is locked.
    LockAfterNextCall,
}

/// Round settings chosen by the operator before the round starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    pub bet_per_card: u32,
    pub commission_rate: f64,
    pub interval_ms: u64,
    pub winning_pattern: WinningPattern,
    pub total_cards: u32,
    pub selected_card_ids: BTreeSet<CardId>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub disposition_policy: DispositionPolicy,
}

impl RoundConfig {
    /// Config with shop defaults: bet 10, 20% commission, 12 second calls.
    pub fn new(
        winning_pattern: WinningPattern,
        selected_card_ids: impl IntoIterator<Item = CardId>,
    ) -> Self {
        let selected_card_ids: BTreeSet<CardId> = selected_card_ids.into_iter().collect();
        Self {
            bet_per_card: 10,
            commission_rate: 0.2,
            interval_ms: 12_000,
            winning_pattern,
            total_cards: u32::try_from(selected_card_ids.len()).unwrap_or(u32::MAX),
            selected_card_ids,
            language: Language::default(),
            mode: Mode::default(),
            disposition_policy: DispositionPolicy::default(),
        }
    }

    /// Checks the preconditions for starting a round.
    pub fn validate(&self) -> Result<(), RoundError> {
        if self.selected_card_ids.is_empty() {
            return Err(RoundError::InvalidConfig(
                "at least one card must be selected".into(),
            ));
        }
        if self.bet_per_card == 0 {
            return Err(RoundError::InvalidConfig("bet per card must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.commission_rate) {
            return Err(RoundError::InvalidConfig(
                "commission rate must be within 0..=1".into(),
            ));
        }
        if self.interval_ms == 0 {
            return Err(RoundError::InvalidConfig("interval must be > 0".into()));
        }
        Ok(())
    }

    /// Prize pool after commission.
    pub fn prize(&self) -> f64 {
        let cards = self.selected_card_ids.len() as f64;
        if cards == 0.0 || self.bet_per_card == 0 {
            return 0.0;
        }
        cards * f64::from(self.bet_per_card) * (1.0 - self.commission_rate)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Identity of the round as reported to external services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundContext {
    pub round_id: String,
    pub shop_id: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Found by the per-call check in auto mode.
    AutoCheck,
    /// Claimed by the operator.
    ManualCheck,
    /// All numbers called without a winner.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningCard {
    pub card_id: CardId,
    /// Cells forming the satisfied pattern, no repeats.
    pub cells: Vec<Coord>,
}

/// Terminal outcome of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: String,
    pub pattern: WinningPattern,
    pub resolution: Resolution,
    pub winners: Vec<WinningCard>,
    /// Number of calls made when the round resolved.
    pub calls: usize,
}

impl RoundResult {
    pub fn winner_ids(&self) -> Vec<CardId> {
        self.winners.iter().map(|w| w.card_id).collect()
    }

    pub fn cells_for(&self, card_id: CardId) -> Option<&[Coord]> {
        self.winners
            .iter()
            .find(|w| w.card_id == card_id)
            .map(|w| w.cells.as_slice())
    }

    pub fn has_winner(&self) -> bool {
        !self.winners.is_empty()
    }
}

/// A manual check that did not match. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCheck {
    pub card_id: CardId,
    pub calls: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Bingo(RoundResult),
    Miss(FailedCheck),
}

/// Snapshot sent to the presentation layer after every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallUpdate {
    pub call: Call,
    /// Last calls, most recent first.
    pub recent: Vec<u8>,
    pub calls_made: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The round is not running; nothing was drawn.
    Idle,
    Called(Call),
    /// The tick ended the round. `call` is `None` when the numbers ran out.
    Resolved {
        call: Option<Call>,
        result: RoundResult,
    },
}

/// The round state machine.
///
/// Owns the call history, the selected cards and every collaborator. All mutation goes
/// through its methods; collaborators only ever see copies.
///
/// ```
/// use shopbingo_engine::catalog::generate_cards;
/// use shopbingo_engine::pattern::WinningPattern;
/// use shopbingo_engine::round::{Mode, RoundConfig, RoundContext, RoundEngine, RoundPhase, TickOutcome};
///
/// let cards = generate_cards(10, 1);
/// let mut config = RoundConfig::new(WinningPattern::FullHouse, [1, 2, 3]);
/// config.mode = Mode::Auto;
/// let ctx = RoundContext { round_id: "20250101-000001".into(), shop_id: None };
/// let mut engine = RoundEngine::new(config, ctx, &cards, Some(9)).unwrap();
/// engine.start().unwrap();
/// while engine.phase() == RoundPhase::Running {
///     if let TickOutcome::Resolved { result, .. } = engine.tick() {
///         assert!(result.has_winner());
///     }
/// }
/// ```
pub struct RoundEngine {
    config: RoundConfig,
    context: RoundContext,
    cards: BTreeMap<CardId, CardGrid>,
    caller: NumberCaller,
    phase: RoundPhase,
    mode: Mode,
    dispositions: BTreeMap<CardId, Disposition>,
    /// Call count at which each passed card was flagged.
    passed_at: BTreeMap<CardId, usize>,
    failed_checks: Vec<CardId>,
    result: Option<RoundResult>,
    scheduler: Box<dyn Scheduler>,
    reporter: Box<dyn ReportingSink>,
    announcer: Box<dyn Announcer>,
    observer: Box<dyn RoundObserver>,
}

impl fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundEngine")
            .field("round_id", &self.context.round_id)
            .field("phase", &self.phase)
            .field("mode", &self.mode)
            .field("calls", &self.caller.called().len())
            .finish_non_exhaustive()
    }
}

impl RoundEngine {
    /// Builds a round over the selected cards of `catalog`.
    ///
    /// # Errors
    ///
    /// [`RoundError::UnknownCard`] when a selected id is missing from the catalog.
    pub fn new(
        config: RoundConfig,
        context: RoundContext,
        catalog: &[BingoCard],
        seed: Option<u64>,
    ) -> Result<Self, RoundError> {
        let mut cards = BTreeMap::new();
        for id in &config.selected_card_ids {
            let card = catalog
                .iter()
                .find(|c| c.card_id() == *id)
                .ok_or(RoundError::UnknownCard(*id))?;
            cards.insert(*id, card.grid());
        }
        Ok(Self {
            mode: config.mode,
            config,
            context,
            cards,
            caller: NumberCaller::new(seed),
            phase: RoundPhase::Configuring,
            dispositions: BTreeMap::new(),
            passed_at: BTreeMap::new(),
            failed_checks: Vec::new(),
            result: None,
            scheduler: Box::new(ManualScheduler::new()),
            reporter: Box::new(NullReportSink),
            announcer: Box::new(SilentAnnouncer),
            observer: Box::new(NullObserver),
        })
    }

    pub fn with_scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    pub fn with_reporter(mut self, reporter: impl ReportingSink + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_announcer(mut self, announcer: impl Announcer + 'static) -> Self {
        self.announcer = Box::new(announcer);
        self
    }

    pub fn with_observer(mut self, observer: impl RoundObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn context(&self) -> &RoundContext {
        &self.context
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn called(&self) -> &CalledNumbers {
        self.caller.called()
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    pub fn grid(&self, card_id: CardId) -> Option<&CardGrid> {
        self.cards.get(&card_id)
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.keys().copied()
    }

    pub fn disposition(&self, card_id: CardId) -> Disposition {
        self.dispositions
            .get(&card_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn cards_with(&self, disposition: Disposition) -> Vec<CardId> {
        self.dispositions
            .iter()
            .filter(|(_, d)| **d == disposition)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Card ids of manual checks that missed this round, in check order.
    pub fn failed_checks(&self) -> &[CardId] {
        &self.failed_checks
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), RoundError> {
        if self.phase == RoundPhase::Resolved {
            return Err(self.invalid("change mode"));
        }
        if self.mode != mode {
            tracing::info!(round_id = %self.context.round_id, mode = mode.as_str(), "mode changed");
        }
        self.mode = mode;
        Ok(())
    }

    /// Replaces the round identity, e.g. to give a restarted round a fresh id.
    pub fn set_context(&mut self, context: RoundContext) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Configuring {
            return Err(self.invalid("change round id"));
        }
        self.context = context;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Configuring {
            return Err(self.invalid("start"));
        }
        self.phase = RoundPhase::Running;
        self.scheduler.start(self.config.interval());
        tracing::info!(
            round_id = %self.context.round_id,
            pattern = %self.config.winning_pattern,
            cards = self.cards.len(),
            mode = self.mode.as_str(),
            "round started"
        );
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Running {
            return Err(self.invalid("pause"));
        }
        self.scheduler.stop();
        self.phase = RoundPhase::Paused;
        tracing::info!(round_id = %self.context.round_id, "round paused");
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Paused {
            return Err(self.invalid("resume"));
        }
        self.phase = RoundPhase::Running;
        self.scheduler.start(self.config.interval());
        tracing::info!(round_id = %self.context.round_id, "round resumed");
        Ok(())
    }

    /// Pauses a running round or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Result<RoundPhase, RoundError> {
        match self.phase {
            RoundPhase::Running => self.pause()?,
            RoundPhase::Paused => self.resume()?,
            _ => return Err(self.invalid("toggle pause")),
        }
        Ok(self.phase)
    }

    /// Cancels the timer and clears calls, dispositions and results. The selected cards
    /// stay available and the round returns to configuring.
    pub fn restart(&mut self) {
        self.scheduler.stop();
        self.caller.reset();
        self.dispositions.clear();
        self.passed_at.clear();
        self.failed_checks.clear();
        self.result = None;
        self.mode = self.config.mode;
        self.phase = RoundPhase::Configuring;
        tracing::info!(round_id = %self.context.round_id, "round restarted");
    }

    /// One scheduler tick: draw a number, then evaluate according to the mode.
    ///
    /// Outside `Running` this is a no-op, so a stale tick after pause or restart cannot
    /// touch the round.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != RoundPhase::Running {
            return TickOutcome::Idle;
        }

        let call = match self.caller.draw_next() {
            Ok(call) => call,
            Err(_) => {
                tracing::info!(round_id = %self.context.round_id, "all numbers called, no winner");
                let result = self.resolve(Resolution::Exhausted, Vec::new());
                return TickOutcome::Resolved { call: None, result };
            }
        };

        tracing::debug!(
            round_id = %self.context.round_id,
            call = %call,
            calls = self.caller.called().len(),
            "number called"
        );
        self.announcer.announce(call);
        let update = CallUpdate {
            call,
            recent: self.caller.called().recent(RECENT_CALLS).to_vec(),
            calls_made: self.caller.called().len(),
        };
        self.observer.on_call(&update);

        match self.mode {
            Mode::Auto => {
                let winners = self.find_winners();
                if !winners.is_empty() {
                    let result = self.resolve(Resolution::AutoCheck, winners);
                    return TickOutcome::Resolved {
                        call: Some(call),
                        result,
                    };
                }
            }
            Mode::Manual => {
                if self.config.disposition_policy == DispositionPolicy::LockAfterNextCall {
                    self.sweep_dispositions();
                }
            }
        }
        TickOutcome::Called(call)
    }

    /// Evaluates one card on the operator's request against the current calls.
    ///
    /// # Errors
    ///
    /// Validation failures leave the round untouched: [`CheckError::NoCalledNumbers`],
    /// [`CheckError::CardLocked`], [`CheckError::CardNotFound`] and
    /// [`CheckError::RoundNotActive`] once the round is resolved.
    pub fn check_card(&mut self, card_id: CardId) -> Result<CheckOutcome, CheckError> {
        if self.phase == RoundPhase::Resolved {
            return Err(CheckError::RoundNotActive(self.phase));
        }
        if self.caller.called().is_empty() {
            return Err(CheckError::NoCalledNumbers);
        }
        if self.disposition(card_id) == Disposition::Locked {
            return Err(CheckError::CardLocked(card_id));
        }
        let grid = self
            .cards
            .get(&card_id)
            .ok_or(CheckError::CardNotFound(card_id))?;

        match evaluate(self.config.winning_pattern, grid, self.caller.called().set()) {
            Some(cells) => {
                tracing::info!(round_id = %self.context.round_id, card_id, "manual check won");
                let result = self.resolve(
                    Resolution::ManualCheck,
                    vec![WinningCard { card_id, cells }],
                );
                Ok(CheckOutcome::Bingo(result))
            }
            None => {
                let miss = FailedCheck {
                    card_id,
                    calls: self.caller.called().len(),
                };
                tracing::info!(round_id = %self.context.round_id, card_id, "manual check missed");
                self.failed_checks.push(card_id);
                self.observer.on_manual_miss(&miss);
                Ok(CheckOutcome::Miss(miss))
            }
        }
    }

    /// Flags every selected card that currently satisfies the pattern: clear cards become
    /// passed, passed cards become locked once at least one more number has been called
    /// since they were passed. Returns the cards whose disposition changed.
    pub fn sweep_dispositions(&mut self) -> Vec<(CardId, Disposition)> {
        let called = *self.caller.called().set();
        let calls = self.caller.called().len();
        let pattern = self.config.winning_pattern;
        let mut changed = Vec::new();
        for (id, grid) in &self.cards {
            let current = self.dispositions.get(id).copied().unwrap_or_default();
            if current == Disposition::Locked || evaluate(pattern, grid, &called).is_none() {
                continue;
            }
            if current == Disposition::Passed
                && self.passed_at.get(id).is_some_and(|at| calls <= *at)
            {
                continue;
            }
            let next = match current {
                Disposition::Clear => Disposition::Passed,
                _ => Disposition::Locked,
            };
            tracing::info!(
                round_id = %self.context.round_id,
                card_id = *id,
                disposition = ?next,
                "card disposition changed"
            );
            changed.push((*id, next));
        }
        for (id, d) in &changed {
            if *d == Disposition::Passed {
                self.passed_at.insert(*id, calls);
            }
            self.dispositions.insert(*id, *d);
        }
        changed
    }

    fn find_winners(&self) -> Vec<WinningCard> {
        let called = self.caller.called().set();
        self.cards
            .iter()
            .filter(|(id, _)| self.disposition(**id) != Disposition::Locked)
            .filter_map(|(id, grid)| {
                evaluate(self.config.winning_pattern, grid, called).map(|cells| WinningCard {
                    card_id: *id,
                    cells,
                })
            })
            .collect()
    }

    /// Moves to `Resolved`, then notifies the presentation layer and dispatches one
    /// submission per winner. Dispatch failures are logged and do not affect the result.
    fn resolve(&mut self, resolution: Resolution, winners: Vec<WinningCard>) -> RoundResult {
        self.scheduler.stop();
        self.phase = RoundPhase::Resolved;
        let result = RoundResult {
            round_id: self.context.round_id.clone(),
            pattern: self.config.winning_pattern,
            resolution,
            winners,
            calls: self.caller.called().len(),
        };
        self.result = Some(result.clone());
        tracing::info!(
            round_id = %result.round_id,
            resolution = ?resolution,
            winners = ?result.winner_ids(),
            calls = result.calls,
            "round resolved"
        );
        self.observer.on_resolved(&result);

        let prize = self.config.prize();
        for card_id in result.winner_ids() {
            let submission = WinningSubmission {
                card_id,
                round_id: self.context.round_id.clone(),
                shop_id: self.context.shop_id.clone(),
                prize,
            };
            if let Err(e) = self.reporter.submit(&submission) {
                tracing::warn!(
                    round_id = %submission.round_id,
                    card_id,
                    error = %e,
                    "failed to submit winning card"
                );
            }
        }
        result
    }

    fn invalid(&self, action: &'static str) -> RoundError {
        RoundError::InvalidTransition {
            phase: self.phase,
            action,
        }
    }
}
