//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid ticker list.
    #[error("Invalid ticker list: {0}")]
    InvalidTickers(String),

    /// Invalid weight list.
    #[error("Invalid weight '{0}'. Use comma-separated numbers, e.g. 0.6,0.4.")]
    InvalidWeight(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
