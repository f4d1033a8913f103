//! `sim` command: plays auto-mode rounds back to back and summarises them.
//!
//! Each round uses seed `base + index`, so a run can be reproduced from the printed base
//! seed. Results can be written as JSONL, one [`RoundResult`] per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use shopbingo_engine::round::{
    Mode, RoundConfig, RoundContext, RoundEngine, RoundResult, TickOutcome,
};

use super::{load_catalog, parse_pattern_arg, todays_round_id};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_result_summary;
use crate::io_utils::ensure_parent_dir;
use crate::validation::parse_card_list;

#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    rounds: u32,
    cards: String,
    pattern: Option<String>,
    seed: Option<u64>,
    catalog: Option<String>,
    output: Option<String>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        return Err(CliError::InvalidInput("rounds must be >= 1".into()));
    }
    let selected = parse_card_list(&cards).map_err(CliError::InvalidInput)?;
    let pattern = parse_pattern_arg(pattern.as_deref(), config.pattern)?;
    let catalog = load_catalog(
        catalog.as_deref(),
        config.cards_dir.as_deref(),
        config.shop_id.as_deref(),
    )?;
    let base_seed = seed.or(config.seed).unwrap_or_else(rand::random);

    let mut writer = match output.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            ensure_parent_dir(path).map_err(CliError::InvalidInput)?;
            Some(BufWriter::new(File::create(path)?))
        }
        None => None,
    };

    writeln!(out, "Seed: {}", base_seed)?;
    let mut total_calls = 0usize;
    let mut won = 0u32;
    for index in 0..rounds {
        let mut round_config = RoundConfig::new(pattern, selected.iter().copied());
        round_config.bet_per_card = config.bet_per_card;
        round_config.commission_rate = config.commission_rate;
        round_config.mode = Mode::Auto;
        round_config
            .validate()
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;
        let context = RoundContext {
            round_id: todays_round_id(index + 1),
            shop_id: config.shop_id.clone(),
        };
        let seed = base_seed.wrapping_add(u64::from(index));
        let result = play_to_end(RoundEngine::new(round_config, context, &catalog, Some(seed))?)?;

        writeln!(out, "{}", format_result_summary(&result))?;
        total_calls += result.calls;
        if result.has_winner() {
            won += 1;
        }
        if let Some(w) = writer.as_mut() {
            let line = serde_json::to_string(&result).map_err(std::io::Error::other)?;
            writeln!(w, "{}", line)?;
        }
    }
    if let Some(mut w) = writer {
        w.flush()?;
    }

    writeln!(
        out,
        "Rounds: {}  With winner: {}  Exhausted: {}  Average calls: {:.1}",
        rounds,
        won,
        rounds - won,
        total_calls as f64 / f64::from(rounds)
    )?;
    Ok(())
}

fn play_to_end(mut engine: RoundEngine) -> Result<RoundResult, CliError> {
    engine.start()?;
    loop {
        match engine.tick() {
            TickOutcome::Resolved { result, .. } => return Ok(result),
            TickOutcome::Called(_) => {}
            TickOutcome::Idle => {
                return Err(CliError::Engine(format!(
                    "round stopped in phase {}",
                    engine.phase()
                )));
            }
        }
    }
}
