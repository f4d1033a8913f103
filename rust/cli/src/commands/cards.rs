//! `cards gen` and `cards verify`: produce and check shop card catalogs.

use std::io::Write;
use std::path::Path;

use shopbingo_engine::catalog::{generate_cards, parse_cards};

use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, read_text};

/// Generate `count` cards as a JSON catalog, to `output` or stdout.
pub fn handle_cards_gen_command(
    count: u32,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(CliError::InvalidInput("count must be >= 1".into()));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let cards = generate_cards(count, seed);
    let json = serde_json::to_string_pretty(&cards).map_err(std::io::Error::other)?;
    match output {
        Some(path) => {
            let path = Path::new(&path);
            ensure_parent_dir(path).map_err(CliError::InvalidInput)?;
            std::fs::write(path, json)?;
            writeln!(
                err,
                "Wrote {} cards to {} (seed {})",
                cards.len(),
                path.display(),
                seed
            )?;
        }
        None => writeln!(out, "{}", json)?,
    }
    Ok(())
}

/// Validate every card in a catalog file.
pub fn handle_cards_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let text = read_text(Path::new(&input)).map_err(CliError::InvalidInput)?;
    match parse_cards(&text) {
        Ok(cards) => {
            writeln!(out, "OK: {} cards", cards.len())?;
            Ok(())
        }
        Err(e) => {
            writeln!(err, "Invalid catalog {}: {}", input, e)?;
            Err(e.into())
        }
    }
}
