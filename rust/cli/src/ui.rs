//! Helpers for consistent terminal messages across commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Formats an amount of money the way the shop screen shows prizes.
pub fn format_prize(amount: f64) -> String {
    format!("{:.2} ETB", amount)
}
