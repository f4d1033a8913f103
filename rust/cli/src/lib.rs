//! # shopbingo CLI Library
//!
//! Terminal front end for the shop bingo round engine. Runs interactive rounds, inspects
//! cards and draw sequences, simulates rounds and manages card catalogs.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["shopbingo", "play", "--cards", "1-20", "--mode", "auto"];
//! let code = shopbingo_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Run rounds interactively (manual or auto calling)
//! - `card`: Print a card, marked against called numbers
//! - `draw`: Print the call sequence for a seed
//! - `sim`: Play auto-mode rounds and summarise them
//! - `cards gen` / `cards verify`: Generate or validate card catalogs
//! - `patterns`: List the winning patterns
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod report;
pub mod terminal;
pub mod ui;
pub mod validation;

use cli::{CardsCommand, Commands, ShopbingoCli};
use commands::{
    handle_card_command, handle_cards_gen_command, handle_cards_verify_command,
    handle_cfg_command, handle_draw_command, handle_patterns_command, handle_play_command,
    handle_sim_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Reads operator input for `play` from the process stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["shopbingo", "draw", "--seed", "42", "--count", "5"];
/// let code = shopbingo_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`] with an injected operator input stream.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "card", "draw", "sim", "cards", "patterns", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ShopbingoCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "shopbingo: shop bingo round engine");
                    write_or_exit!(err, "Usage: shopbingo <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: shopbingo --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Patterns => handle_patterns_command(out),
        Commands::Draw { seed, count } => handle_draw_command(seed, count, out),
        Commands::Cards { cmd } => match cmd {
            CardsCommand::Gen {
                count,
                seed,
                output,
            } => handle_cards_gen_command(count, seed, output, out, err),
            CardsCommand::Verify { input } => handle_cards_verify_command(input, out, err),
        },
        Commands::Card {
            id,
            catalog,
            called,
            pattern,
        } => load_config().and_then(|config| {
            handle_card_command(id, catalog, config.cards_dir, called, pattern, out)
        }),
        Commands::Sim {
            rounds,
            cards,
            pattern,
            seed,
            catalog,
            output,
        } => load_config().and_then(|config| {
            handle_sim_command(rounds, cards, pattern, seed, catalog, output, &config, out)
        }),
        Commands::Play(args) => {
            load_config().and_then(|config| handle_play_command(args, &config, out, err, stdin))
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = ui::display_warning(err, &format!("Interrupted: {}", msg));
            exit_code::INTERRUPTED
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn load_config() -> Result<config::Config, CliError> {
    config::load_with_sources()
        .map(|resolved| resolved.config)
        .map_err(|e| CliError::Config(e.to_string()))
}
