//! `patterns` command: list the winning patterns by name.

use std::io::Write;

use shopbingo_engine::pattern::WinningPattern;

use crate::error::CliError;

pub fn handle_patterns_command(out: &mut dyn Write) -> Result<(), CliError> {
    for pattern in WinningPattern::catalog() {
        writeln!(out, "{}", pattern)?;
    }
    Ok(())
}
