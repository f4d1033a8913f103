//! Error types for the CLI application.
//!
//! Command handlers return [`CliError`] and propagate with `?`; [`crate::run`] maps it to an
//! exit code.

use std::fmt;

use shopbingo_engine::errors::{CatalogError, RoundError};

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Round engine rejected an operation
    Engine(String),

    /// Input stream was interrupted while waiting for the operator
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<RoundError> for CliError {
    fn from(error: RoundError) -> Self {
        match error {
            RoundError::InvalidConfig(msg) => CliError::InvalidInput(msg),
            RoundError::UnknownCard(_) => CliError::InvalidInput(error.to_string()),
            RoundError::InvalidTransition { .. } => CliError::Engine(error.to_string()),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Io(e) => CliError::Io(e),
            other => CliError::InvalidInput(other.to_string()),
        }
    }
}
