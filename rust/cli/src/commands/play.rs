//! # Play Command
//!
//! Runs rounds from the terminal. Flags override the shop configuration.
//!
//! In manual mode every empty line draws the next number and `check <id>` claims a win.
//! In auto mode numbers are called on the configured interval and every selected card is
//! checked after each call until the round resolves. Operator input is not read while an
//! auto round is running, so it cannot be paused from the terminal; lines typed meanwhile
//! are handled once the round has resolved. To keep pause available, run in manual mode
//! and switch with `auto` only when the operator is ready to let the round finish.
//! Operator commands:
//!
//! - `<enter>` / `n`: call the next number
//! - `check <id>` / `c <id>`: claim a win for a card
//! - `p` / `r`: pause and resume
//! - `auto` / `manual`: switch calling mode
//! - `restart`: start a fresh round with the same cards
//! - `q`: end the session

use std::cell::RefCell;
use std::io::{BufRead, ErrorKind, Write};
use std::rc::Rc;

use shopbingo_engine::announce::Language;
use shopbingo_engine::caller::Call;
use shopbingo_engine::card::CardId;
use shopbingo_engine::round::{
    CheckOutcome, Disposition, DispositionPolicy, Mode, RECENT_CALLS, RoundConfig, RoundContext,
    RoundEngine, RoundPhase, RoundResult, TickOutcome,
};

use super::{load_catalog, parse_pattern_arg, todays_round_id};
use crate::cli::PlayArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_call, format_grid, format_recent, format_result_summary};
use crate::io_utils::read_operator_line;
use crate::report::{JsonlReportSink, LogReportSink};
use crate::terminal::{QueuedAnnouncer, TerminalClock};
use crate::ui;
use crate::validation::{OperatorCommand, parse_card_list, parse_operator_input};

const HELP: &str =
    "Commands: <enter> next, check <id>, p pause, r resume, auto, manual, restart, q quit";

/// Handle the play command: an interactive session of one or more rounds.
///
/// # Errors
///
/// * `CliError::InvalidInput` for a bad card selection, pattern, language or round setting
/// * `CliError::Interrupted` when operator input is interrupted
/// * `CliError::Io` for output failures
pub fn handle_play_command(
    args: PlayArgs,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let round_config = build_round_config(&args, config)?;
    let shop_id = args.shop.clone().or_else(|| config.shop_id.clone());
    let seed = args.seed.or(config.seed);
    let cards = load_catalog(
        args.catalog.as_deref(),
        config.cards_dir.as_deref(),
        shop_id.as_deref(),
    )?;

    let clock = Rc::new(RefCell::new(TerminalClock::new(args.fast)));
    let announcer = Rc::new(RefCell::new(QueuedAnnouncer::new(round_config.language)));
    let mut seq = 1;
    let context = RoundContext {
        round_id: todays_round_id(seq),
        shop_id: shop_id.clone(),
    };
    let engine = RoundEngine::new(round_config, context, &cards, seed)?
        .with_scheduler(Rc::clone(&clock))
        .with_announcer(Rc::clone(&announcer));
    let mut engine = match args.report.as_deref() {
        Some(path) => engine.with_reporter(JsonlReportSink::new(path)),
        None => engine.with_reporter(LogReportSink),
    };

    let session = Session {
        announcer: &announcer,
        announce: args.announce,
    };

    engine.start()?;
    write_header(&engine, out)?;
    writeln!(out, "{}", HELP)?;

    let mut rounds = 1;
    loop {
        if engine.mode() == Mode::Auto
            && engine.phase() == RoundPhase::Running
            && clock.borrow().wait()
        {
            session.step(&mut engine, out)?;
            continue;
        }

        write!(out, "[{} {}]> ", engine.phase(), engine.mode().as_str())?;
        out.flush()?;
        let line = match read_operator_line(stdin) {
            Ok(Some(line)) => line,
            Ok(None) => {
                writeln!(out)?;
                break;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                return Err(CliError::Interrupted("operator input interrupted".into()));
            }
            Err(e) => return Err(e.into()),
        };

        match parse_operator_input(&line) {
            OperatorCommand::Next => match engine.phase() {
                RoundPhase::Running => session.step(&mut engine, out)?,
                RoundPhase::Paused => writeln!(out, "Round is paused. Type 'r' to resume.")?,
                RoundPhase::Resolved => writeln!(
                    out,
                    "Round is over. Type 'restart' for a new round or 'q' to quit."
                )?,
                RoundPhase::Configuring => writeln!(out, "Round has not started.")?,
            },
            OperatorCommand::Check(card_id) => check(&mut engine, card_id, out, err)?,
            OperatorCommand::Pause => match engine.pause() {
                Ok(()) => writeln!(out, "Paused")?,
                Err(e) => ui::display_warning(err, &e.to_string())?,
            },
            OperatorCommand::Resume => match engine.resume() {
                Ok(()) => writeln!(out, "Resumed")?,
                Err(e) => ui::display_warning(err, &e.to_string())?,
            },
            OperatorCommand::SwitchMode(mode) => match engine.set_mode(mode) {
                Ok(()) => writeln!(out, "Mode: {}", mode.as_str())?,
                Err(e) => ui::display_warning(err, &e.to_string())?,
            },
            OperatorCommand::Restart => {
                engine.restart();
                announcer.borrow_mut().drain();
                seq += 1;
                engine.set_context(RoundContext {
                    round_id: todays_round_id(seq),
                    shop_id: shop_id.clone(),
                })?;
                engine.start()?;
                rounds += 1;
                write_header(&engine, out)?;
            }
            OperatorCommand::Quit => break,
            OperatorCommand::Invalid(msg) => ui::display_warning(err, &msg)?,
        }
    }

    writeln!(out, "Session ended after {} round(s)", rounds)?;
    Ok(())
}

fn build_round_config(args: &PlayArgs, config: &Config) -> Result<RoundConfig, CliError> {
    let selected = parse_card_list(&args.cards).map_err(CliError::InvalidInput)?;
    let pattern = parse_pattern_arg(args.pattern.as_deref(), config.pattern)?;
    let language = match args.language.as_deref() {
        Some(s) => s.parse::<Language>().map_err(CliError::InvalidInput)?,
        None => config.language,
    };

    let mut round_config = RoundConfig::new(pattern, selected);
    round_config.bet_per_card = args.bet.unwrap_or(config.bet_per_card);
    round_config.commission_rate = args.commission.unwrap_or(config.commission_rate);
    round_config.interval_ms = args.interval_ms.unwrap_or(config.interval_ms);
    round_config.language = language;
    round_config.mode = args.mode.mode();
    if args.lock_missed {
        round_config.disposition_policy = DispositionPolicy::LockAfterNextCall;
    }
    round_config
        .validate()
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(round_config)
}

fn write_header(engine: &RoundEngine, out: &mut dyn Write) -> Result<(), CliError> {
    let config = engine.config();
    writeln!(
        out,
        "Round {}: {} cards, pattern {}, prize {}, mode {}",
        engine.context().round_id,
        config.selected_card_ids.len(),
        config.winning_pattern,
        ui::format_prize(config.prize()),
        engine.mode().as_str()
    )?;
    Ok(())
}

struct Session<'a> {
    announcer: &'a Rc<RefCell<QueuedAnnouncer>>,
    announce: bool,
}

impl Session<'_> {
    /// Advances the round by one call and prints everything that changed.
    fn step(&self, engine: &mut RoundEngine, out: &mut dyn Write) -> Result<(), CliError> {
        let passed_before = engine.cards_with(Disposition::Passed);
        let locked_before = engine.cards_with(Disposition::Locked);

        match engine.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Called(call) => self.write_call(engine, call, out)?,
            TickOutcome::Resolved { call, result } => {
                if let Some(call) = call {
                    self.write_call(engine, call, out)?;
                }
                write_result(engine, &result, out)?;
            }
        }

        let passed = engine.cards_with(Disposition::Passed);
        if passed != passed_before && !passed.is_empty() {
            writeln!(out, "Unclaimed winners: {}", join_ids(&passed))?;
        }
        let locked = engine.cards_with(Disposition::Locked);
        if locked != locked_before {
            writeln!(out, "Locked cards: {}", join_ids(&locked))?;
        }
        Ok(())
    }

    fn write_call(
        &self,
        engine: &RoundEngine,
        call: Call,
        out: &mut dyn Write,
    ) -> Result<(), CliError> {
        let called = engine.called();
        writeln!(out, "{}", format_call(called.len(), call))?;
        writeln!(
            out,
            "Last calls: {}",
            format_recent(called.recent(RECENT_CALLS))
        )?;
        let lines = self.announcer.borrow_mut().drain();
        if self.announce {
            for line in lines {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}

fn check(
    engine: &mut RoundEngine,
    card_id: CardId,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match engine.check_card(card_id) {
        Ok(CheckOutcome::Bingo(result)) => write_result(engine, &result, out),
        Ok(CheckOutcome::Miss(miss)) => {
            writeln!(
                out,
                "Card {} is not a winner after {} calls",
                miss.card_id, miss.calls
            )?;
            if let Some(grid) = engine.grid(card_id) {
                write!(out, "{}", format_grid(grid, engine.called().set(), &[]))?;
            }
            Ok(())
        }
        Err(e) => {
            ui::display_warning(err, &e.to_string())?;
            Ok(())
        }
    }
}

fn write_result(
    engine: &RoundEngine,
    result: &RoundResult,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(out, "{}", format_result_summary(result))?;
    for winner in &result.winners {
        if let Some(grid) = engine.grid(winner.card_id) {
            writeln!(out, "Card {}", winner.card_id)?;
            write!(
                out,
                "{}",
                format_grid(grid, engine.called().set(), &winner.cells)
            )?;
        }
    }
    if result.has_winner() {
        writeln!(out, "Prize: {}", ui::format_prize(engine.config().prize()))?;
    }
    Ok(())
}

fn join_ids(ids: &[CardId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
