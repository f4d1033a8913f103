use thiserror::Error;

use crate::card::CardId;
use crate::round::RoundPhase;

/// A card record that cannot be turned into a playable grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Card id must be positive")]
    InvalidId,
    #[error("Card {card_id}: column {column} has {found} values, expected 5")]
    ColumnLength {
        card_id: CardId,
        column: char,
        found: usize,
    },
    #[error("Card {card_id}: value {value} in column {column} is outside 1..=75")]
    ValueOutOfRange {
        card_id: CardId,
        column: char,
        value: u32,
    },
    #[error("Card {card_id}: free space at column {column} row {row}, only N row 2 may be free")]
    MisplacedFreeSpace {
        card_id: CardId,
        column: char,
        row: usize,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("Duplicate card id {0} in catalog")]
    DuplicateId(CardId),
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised by the caller once all 75 numbers have been drawn.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("All 75 numbers have been called")]
pub struct ExhaustedError;

/// Manual check validation failures. None of these change round state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("No numbers have been called yet")]
    NoCalledNumbers,
    #[error("Card {0} is locked and cannot win this round")]
    CardLocked(CardId),
    #[error("Card {0} is not among the selected cards")]
    CardNotFound(CardId),
    #[error("Round is not in play (phase: {0})")]
    RoundNotActive(RoundPhase),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("Cannot {action} while round is {phase}")]
    InvalidTransition {
        phase: RoundPhase,
        action: &'static str,
    },
    #[error("Selected card {0} is not in the catalog")]
    UnknownCard(CardId),
    #[error("Invalid round configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by a reporting sink. Logged by the engine, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Reporting sink unavailable: {0}")]
    Unavailable(String),
    #[error("Reporting sink rejected submission: {0}")]
    Rejected(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown winning pattern '{0}'")]
pub struct PatternParseError(pub String);
