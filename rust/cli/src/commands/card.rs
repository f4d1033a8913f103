//! `card` command: print one card, marked against a list of called numbers.

use std::io::Write;

use shopbingo_engine::called::CalledSet;
use shopbingo_engine::card::CardId;
use shopbingo_engine::catalog::find_card;
use shopbingo_engine::pattern::{WinningPattern, evaluate};

use super::{load_catalog, parse_pattern_arg};
use crate::error::CliError;
use crate::formatters::format_grid;
use crate::validation::parse_called_list;

/// Handle the card command.
///
/// With `--pattern`, the cells of a satisfied pattern are highlighted.
pub fn handle_card_command(
    id: CardId,
    catalog: Option<String>,
    cards_dir: Option<String>,
    called: Option<String>,
    pattern: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cards = load_catalog(catalog.as_deref(), cards_dir.as_deref(), None)?;
    let card = find_card(&cards, id)
        .ok_or_else(|| CliError::InvalidInput(format!("Card {} not found in catalog", id)))?;
    let numbers = match called.as_deref() {
        Some(list) => parse_called_list(list).map_err(CliError::InvalidInput)?,
        None => Vec::new(),
    };
    let called: CalledSet = numbers.iter().copied().collect();
    let grid = card.grid();

    writeln!(out, "Card {}", id)?;
    let highlight = match pattern.as_deref() {
        Some(_) => {
            let pattern = parse_pattern_arg(pattern.as_deref(), WinningPattern::All)?;
            let cells = evaluate(pattern, &grid, &called);
            match &cells {
                Some(c) => writeln!(out, "Pattern {}: BINGO ({} cells)", pattern, c.len())?,
                None => writeln!(out, "Pattern {}: not satisfied", pattern)?,
            }
            cells.unwrap_or_default()
        }
        None => Vec::new(),
    };
    write!(out, "{}", format_grid(&grid, &called, &highlight))?;
    Ok(())
}
