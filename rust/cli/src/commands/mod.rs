//! Command handler modules for the shopbingo CLI.
//!
//! Each command lives in its own file and follows the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and operator input passed in as parameters
//! - Errors propagated via [`CliError`]

mod card;
mod cards;
mod cfg;
mod draw;
mod patterns;
mod play;
mod sim;

pub use card::handle_card_command;
pub use cards::{handle_cards_gen_command, handle_cards_verify_command};
pub use cfg::handle_cfg_command;
pub use draw::handle_draw_command;
pub use patterns::handle_patterns_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use std::path::Path;

use chrono::Utc;
use shopbingo_engine::card::BingoCard;
use shopbingo_engine::catalog::{CardCatalog, DirectoryCatalog, default_cards, parse_cards};
use shopbingo_engine::pattern::WinningPattern;
use shopbingo_engine::round::format_round_id;

use crate::error::CliError;
use crate::io_utils::read_text;

/// Cards for a command: an explicit catalog file wins, then the shop's file under the
/// configured cards directory, then the built-in set.
pub(crate) fn load_catalog(
    catalog: Option<&str>,
    cards_dir: Option<&str>,
    shop_id: Option<&str>,
) -> Result<Vec<BingoCard>, CliError> {
    if let Some(path) = catalog {
        let text = read_text(Path::new(path)).map_err(CliError::InvalidInput)?;
        return Ok(parse_cards(&text)?);
    }
    if let Some(dir) = cards_dir {
        return Ok(DirectoryCatalog::new(dir).cards(shop_id));
    }
    Ok(default_cards())
}

pub(crate) fn parse_pattern_arg(
    arg: Option<&str>,
    fallback: WinningPattern,
) -> Result<WinningPattern, CliError> {
    match arg {
        Some(s) => s
            .parse()
            .map_err(|e: shopbingo_engine::errors::PatternParseError| {
                CliError::InvalidInput(e.to_string())
            }),
        None => Ok(fallback),
    }
}

/// Round id for the `seq`-th round of today's session.
pub(crate) fn todays_round_id(seq: u32) -> String {
    format_round_id(&Utc::now().format("%Y%m%d").to_string(), seq)
}
