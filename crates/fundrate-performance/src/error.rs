//! Error types for performance calculations.

use fundrate_core::{CoreError, Date};
use fundrate_math::MathError;
use thiserror::Error;

/// A specialized Result type for performance calculations.
pub type PerformanceResult<T> = Result<T, PerformanceError>;

/// Errors raised while building effective cashflows, solving for rates, or
/// assembling performance tables.
#[derive(Error, Debug, Clone)]
pub enum PerformanceError {
    /// The closed-form solve is undefined for these flows.
    #[error("Domain error: {reason}")]
    DomainError {
        /// Why the logarithm or the day count is unusable.
        reason: String,
    },

    /// None of the configured brackets contains a sign change of the NPV.
    #[error("No sign change of NPV in any bracket {brackets:?}")]
    NoBracket {
        /// The brackets that were tried, in order.
        brackets: Vec<(f64, f64)>,
    },

    /// The numerical solution does not actually zero the NPV.
    #[error("NPV at solved rate {rate:.6} is {residual:.2}, beyond tolerance {tolerance}")]
    ResidualTooLarge {
        /// The rate returned by the root finder.
        rate: f64,
        /// NPV evaluated at `rate`.
        residual: f64,
        /// Largest accepted absolute NPV.
        tolerance: f64,
    },

    /// Fewer than two non-zero flows cannot define a rate of return.
    #[error("At least two non-zero cashflows are required, found {non_zero}")]
    InsufficientCashflows {
        /// Number of non-zero entries found.
        non_zero: usize,
    },

    /// A roster entity has no history.
    #[error("Unknown entity: {name}")]
    UnknownEntity {
        /// The entity name.
        name: String,
    },

    /// A failure while computing one table cell.
    #[error("{entity} on {date}: {source}")]
    Cell {
        /// Entity being evaluated.
        entity: String,
        /// Evaluation date.
        date: Date,
        /// The underlying failure.
        #[source]
        source: Box<PerformanceError>,
    },

    /// The root finder gave up for a reason other than the bracket.
    #[error("Solver error: {0}")]
    Solver(#[from] MathError),

    /// Series construction or lookup failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PerformanceError {
    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::DomainError {
            reason: reason.into(),
        }
    }

    /// Creates an unknown entity error.
    #[must_use]
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    /// Tags this error with the table cell it occurred in.
    #[must_use]
    pub fn at(self, entity: impl Into<String>, date: Date) -> Self {
        Self::Cell {
            entity: entity.into(),
            date,
            source: Box::new(self),
        }
    }

    /// The failure without any cell tagging.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Cell { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
