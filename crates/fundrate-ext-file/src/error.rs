//! File adapter errors.

use std::path::PathBuf;

use fundrate_core::CoreError;
use thiserror::Error;

/// Result type of the file adapters.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing CSV tables.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened, read or written.
    #[error("{path}: {source}")]
    Csv {
        /// File involved.
        path: PathBuf,
        /// Underlying CSV or I/O error.
        #[source]
        source: csv::Error,
    },

    /// The file has no `Date` column.
    #[error("{path}: missing '{column}' column")]
    MissingDateColumn {
        /// File involved.
        path: PathBuf,
        /// Expected column name.
        column: String,
    },

    /// A cell could not be parsed.
    #[error("{path}, line {line}: {message}")]
    Cell {
        /// File involved.
        path: PathBuf,
        /// 1-based line number.
        line: u64,
        /// Description of the problem.
        message: String,
    },

    /// The table read from the file is inconsistent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<FileError> for CoreError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Core(inner) => inner,
            err @ FileError::Csv { .. } => CoreError::Io(err.to_string()),
            other => CoreError::Parse(other.to_string()),
        }
    }
}
