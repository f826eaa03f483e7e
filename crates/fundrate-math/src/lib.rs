//! # Fundrate Math
//!
//! Numerical utilities for the Fundrate performance toolkit.
//!
//! This crate provides derivative-free, bracketed root finders:
//!
//! - [`solvers::brent`]: Brent's method (bisection, secant and inverse
//!   quadratic interpolation)
//! - [`solvers::bisection`]: plain interval halving
//!
//! Both require a sign change over the bracket and report the bracket values
//! when there is none, so callers can fall back to a wider interval.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, brent, BisectionSolver, BracketSolver, BrentSolver, SolverConfig,
        SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
