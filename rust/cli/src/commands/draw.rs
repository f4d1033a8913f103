//! `draw` command: print the call sequence a seed produces.

use std::io::Write;

use shopbingo_engine::called::MAX_NUMBER;
use shopbingo_engine::caller::NumberCaller;

use crate::error::CliError;
use crate::formatters::format_call;

/// Handle the draw command.
///
/// Without a seed a random one is chosen and printed so the sequence can be replayed.
pub fn handle_draw_command(
    seed: Option<u64>,
    count: u32,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 || count > u32::from(MAX_NUMBER) {
        return Err(CliError::InvalidInput(format!(
            "count must be within 1..={}, got {}",
            MAX_NUMBER, count
        )));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut caller = NumberCaller::new_with_seed(seed);
    writeln!(out, "Seed: {}", seed)?;
    for index in 1..=count as usize {
        let call = caller
            .draw_next()
            .map_err(|e| CliError::Engine(e.to_string()))?;
        writeln!(out, "{}", format_call(index, call))?;
    }
    Ok(())
}
