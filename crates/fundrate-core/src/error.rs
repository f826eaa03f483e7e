//! Error types for the Fundrate core crate.
//!
//! This module defines the errors raised while constructing and reshaping
//! date-indexed series, and by the boundary traits.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Series dates are not strictly increasing.
    #[error("Dates must be strictly increasing: {previous} is followed by {next}")]
    UnorderedDates {
        /// The earlier position's date.
        previous: String,
        /// The offending date.
        next: String,
    },

    /// Index and value vectors differ in length.
    #[error("Length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values.
        values: usize,
    },

    /// Cashflow and valuation series do not share a date index.
    #[error("Misaligned series for '{entity}': {reason}")]
    MisalignedSeries {
        /// Entity whose series disagree.
        entity: String,
        /// What differs.
        reason: String,
    },

    /// A series must hold at least one observation.
    #[error("Empty series: {context}")]
    EmptySeries {
        /// Where the empty series was found.
        context: String,
    },

    /// A requested column is not in the table.
    #[error("Unknown column: {name}")]
    UnknownColumn {
        /// The column name.
        name: String,
    },

    /// A column name appears twice in one table.
    #[error("Duplicate column: {name}")]
    DuplicateColumn {
        /// The column name.
        name: String,
    },

    /// A column has no value where one is required.
    #[error("Missing value in column '{column}' on {date}")]
    MissingValue {
        /// The column name.
        column: String,
        /// The date without a value.
        date: String,
    },

    /// Underlying I/O failure at a boundary.
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed input at a boundary.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a misaligned series error.
    #[must_use]
    pub fn misaligned(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MisalignedSeries {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Creates an empty series error.
    #[must_use]
    pub fn empty_series(context: impl Into<String>) -> Self {
        Self::EmptySeries {
            context: context.into(),
        }
    }

    /// Creates an unknown column error.
    #[must_use]
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::misaligned("Fund A", "valuation has 3 rows, cashflow has 2");
        assert!(err.to_string().contains("Fund A"));
        assert!(err.to_string().contains("3 rows"));
    }

    #[test]
    fn test_unordered_display() {
        let err = CoreError::UnorderedDates {
            previous: "2024-01-02".into(),
            next: "2024-01-01".into(),
        };
        assert!(err.to_string().contains("2024-01-02 is followed by 2024-01-01"));
    }
}
