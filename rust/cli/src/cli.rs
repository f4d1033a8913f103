//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use shopbingo_engine::card::CardId;
use shopbingo_engine::round::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "shopbingo",
    version,
    about = "Shop bingo round engine CLI",
    long_about = None
)]
pub struct ShopbingoCli {
    /// Log engine events at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an interactive round from the terminal
    Play(PlayArgs),
    /// Show one card, optionally marked against called numbers
    Card {
        #[arg(long)]
        id: CardId,
        /// JSON card catalog (defaults to the built-in set)
        #[arg(long)]
        catalog: Option<String>,
        /// Comma-separated called numbers, e.g. "1,16,31"
        #[arg(long)]
        called: Option<String>,
        /// Pattern to evaluate against the called numbers
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Print a draw sequence
    Draw {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 75)]
        count: u32,
    },
    /// Play auto-mode rounds without a terminal and summarise the results
    Sim {
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        /// Card selection, e.g. "1-20" or "3,7,12"
        #[arg(long)]
        cards: String,
        #[arg(long)]
        pattern: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        catalog: Option<String>,
        /// Write one JSON result per round
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate or verify card catalogs
    Cards {
        #[command(subcommand)]
        cmd: CardsCommand,
    },
    /// List the winning patterns
    Patterns,
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Subcommand, Debug)]
pub enum CardsCommand {
    /// Generate a catalog of standard cards
    Gen {
        #[arg(long, default_value_t = 400)]
        count: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Validate a catalog file
    Verify {
        #[arg(long)]
        input: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Card selection, e.g. "1-20" or "3,7,12"
    #[arg(long)]
    pub cards: String,
    #[arg(long)]
    pub pattern: Option<String>,
    #[arg(long, value_enum, default_value_t = ModeArg::Manual)]
    pub mode: ModeArg,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub interval_ms: Option<u64>,
    #[arg(long)]
    pub bet: Option<u32>,
    #[arg(long)]
    pub commission: Option<f64>,
    #[arg(long)]
    pub catalog: Option<String>,
    #[arg(long)]
    pub shop: Option<String>,
    /// Append winning submissions to this JSONL outbox
    #[arg(long)]
    pub report: Option<String>,
    /// Lock cards that qualify and are not claimed before the next call
    #[arg(long)]
    pub lock_missed: bool,
    /// Print announcements for every call
    #[arg(long)]
    pub announce: bool,
    #[arg(long)]
    pub language: Option<String>,
    /// Do not sleep between auto-mode calls
    #[arg(long)]
    pub fast: bool,
}

/// Calling mode for the `play` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Check every selected card after each call
    Auto,
    /// Draw on the operator's command and check claimed cards only
    Manual,
}

impl ModeArg {
    /// Returns the engine mode.
    ///
    /// ```
    /// # use shopbingo_cli::cli::ModeArg;
    /// # use shopbingo_engine::round::Mode;
    /// assert_eq!(ModeArg::Auto.mode(), Mode::Auto);
    /// ```
    pub fn mode(self) -> Mode {
        match self {
            ModeArg::Auto => Mode::Auto,
            ModeArg::Manual => Mode::Manual,
        }
    }
}
