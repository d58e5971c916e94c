//! Badge printing errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintError {
    /// Could not reach the printer unit
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Printer unit did not answer in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Malformed `unit#name` target or printer address
    #[error("Invalid printer target: {0}")]
    InvalidTarget(String),

    /// Record has nothing printable on a badge
    #[error("Nothing to print: {0}")]
    EmptyBadge(String),
}

pub type PrintResult<T> = Result<T, PrintError>;
