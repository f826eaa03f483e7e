//! Bracketed root-finding algorithms.
//!
//! - [`brent`]: superlinear convergence, guaranteed inside a valid bracket
//! - [`bisection`]: linear convergence, guaranteed inside a valid bracket
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Example: continuously compounded rate
//!
//! ```rust
//! use fundrate_math::solvers::{brent, SolverConfig};
//!
//! // 1000 invested, 1100 returned one year later
//! let npv = |r: f64| -1000.0 + 1100.0 * (-r).exp();
//!
//! let result = brent(npv, -1.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - 1.1_f64.ln()).abs() < 1e-9);
//! ```

mod bisection;
mod brent;

pub use bisection::bisection;
pub use brent::brent;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence, applied both to the residual and to the
    /// bracket width.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Trait for derivative-free solvers that search inside a bracket.
pub trait BracketSolver {
    /// Finds a root of `f` inside `[a, b]`.
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Brent's method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl BracketSolver for BrentSolver {
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        brent(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl BracketSolver for BisectionSolver {
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Selectable bracketed method, for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverMethod {
    /// Brent's method.
    #[default]
    Brent,
    /// Bisection.
    Bisection,
}

impl SolverMethod {
    /// Runs the selected method.
    pub fn solve<F>(self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Self::Brent => BrentSolver.solve(f, a, b, config),
            Self::Bisection => BisectionSolver.solve(f, a, b, config),
        }
    }

    /// Returns the name of the selected method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Brent => BrentSolver.name(),
            Self::Bisection => BisectionSolver.name(),
        }
    }
}
