//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid `--flow` value.
    #[error("Invalid cashflow: {0}. Use DATE:AMOUNT, e.g. 2024-01-31:-1500.")]
    InvalidFlow(String),

    /// Refusing to replace an existing file.
    #[error("{0} already exists. Use --force to overwrite.")]
    FileExists(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
