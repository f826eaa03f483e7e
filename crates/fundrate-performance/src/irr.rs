//! Internal rate of return of an effective cashflow.
//!
//! Rates are continuously compounded over a 365-day year:
//!
//! ```text
//! NPV(r) = Σ c_i · exp(-r · d_i / 365)
//! ```
//!
//! A stream with exactly two non-zero flows has the closed-form root
//! `r = (365 / d) · ln(-c1 / c0)`. Any other stream is solved numerically
//! with a bracketed root finder, trying each configured bracket in turn,
//! and the result is rejected if the NPV at the root is not close to zero.

use fundrate_math::solvers::{SolverConfig, SolverMethod};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cashflow::EffectiveCashflow;
use crate::error::{PerformanceError, PerformanceResult};

/// Days per year of the rate convention.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Largest accepted absolute NPV at a numerical solution, in currency units.
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1000.0;

/// Brackets tried by the numerical solve, in order.
pub const DEFAULT_BRACKETS: [(f64, f64); 2] = [(-1.0, 1.0), (-1000.0, 1000.0)];

/// Net present value of `cashflow` at the continuously compounded annual
/// `rate`, with `days` measured from the first flow.
///
/// Pairs beyond the shorter of the two slices are ignored.
#[must_use]
pub fn npv(days: &[i64], cashflow: &[f64], rate: f64) -> f64 {
    days.iter()
        .zip(cashflow)
        .map(|(&d, &c)| c * (-rate * d as f64 / DAYS_PER_YEAR).exp())
        .sum()
}

/// Effective (simple, holding-period) yield of `rate` over `days`.
#[must_use]
pub fn effective_yield(rate: f64, days: i64) -> f64 {
    (rate * days as f64 / DAYS_PER_YEAR).exp() - 1.0
}

/// How a rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrMethod {
    /// Two-flow closed form.
    ClosedForm,
    /// Bracketed root search.
    Numerical {
        /// The bracket that contained the root.
        bracket: (f64, f64),
        /// Root-finder iterations.
        iterations: u32,
    },
}

/// A solved rate of return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrResult {
    /// Continuously compounded annual rate.
    pub rate: f64,
    /// Compounded growth over the whole stream, `exp(rate · d / 365) - 1`.
    pub effective_yield: f64,
    /// NPV at `rate`.
    pub residual: f64,
    /// Which branch produced the rate.
    pub method: IrrMethod,
}

/// Settings of the numerical branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSolverConfig {
    /// Brackets searched for a sign change, in order.
    pub brackets: Vec<(f64, f64)>,
    /// Largest accepted absolute NPV at the solution.
    pub residual_tolerance: f64,
    /// Root-finding method.
    pub method: SolverMethod,
    /// Root-finder tolerance and iteration cap.
    pub solver: SolverConfig,
}

impl Default for IrrSolverConfig {
    fn default() -> Self {
        Self {
            brackets: DEFAULT_BRACKETS.to_vec(),
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            method: SolverMethod::Brent,
            solver: SolverConfig::new(2e-12, 500),
        }
    }
}

impl IrrSolverConfig {
    /// Replaces the bracket list.
    #[must_use]
    pub fn with_brackets(mut self, brackets: Vec<(f64, f64)>) -> Self {
        self.brackets = brackets;
        self
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_residual_tolerance(mut self, tolerance: f64) -> Self {
        self.residual_tolerance = tolerance;
        self
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the root-finder settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// IRR solver choosing between the closed form and the numerical search.
#[derive(Debug, Clone, Default)]
pub struct IrrSolver {
    config: IrrSolverConfig,
}

impl IrrSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given settings.
    #[must_use]
    pub fn with_config(config: IrrSolverConfig) -> Self {
        Self { config }
    }

    /// The solver settings.
    #[must_use]
    pub fn config(&self) -> &IrrSolverConfig {
        &self.config
    }

    /// Solves `flows` for its rate of return.
    ///
    /// # Errors
    ///
    /// - `InsufficientCashflows` with fewer than two non-zero flows
    /// - `DomainError` from the closed form
    /// - `NoBracket` or `ResidualTooLarge` from the numerical search
    pub fn solve(&self, flows: &EffectiveCashflow) -> PerformanceResult<IrrResult> {
        match flows.non_zero_count() {
            n @ (0 | 1) => Err(PerformanceError::InsufficientCashflows { non_zero: n }),
            2 => simple_irr_solve(flows),
            _ => self.solve_numerical(flows),
        }
    }

    /// Solves `flows` with the bracketed search, whatever its flow count.
    pub fn solve_numerical(&self, flows: &EffectiveCashflow) -> PerformanceResult<IrrResult> {
        let days = flows.days();
        let amounts = flows.amounts();
        let f = |r: f64| npv(days, amounts, r);

        let mut found = None;
        for &(lo, hi) in &self.config.brackets {
            match self.config.method.solve(f, lo, hi, &self.config.solver) {
                Ok(result) => {
                    found = Some(((lo, hi), result));
                    break;
                }
                Err(e) if e.is_invalid_bracket() => {
                    debug!(lo, hi, "no sign change in bracket");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let Some((bracket, result)) = found else {
            return Err(PerformanceError::NoBracket {
                brackets: self.config.brackets.clone(),
            });
        };

        let rate = result.root;
        let residual = f(rate);
        if !(residual.abs() <= self.config.residual_tolerance) {
            return Err(PerformanceError::ResidualTooLarge {
                rate,
                residual,
                tolerance: self.config.residual_tolerance,
            });
        }

        debug!(
            rate,
            residual,
            iterations = result.iterations,
            method = self.config.method.name(),
            "numerical IRR"
        );

        Ok(IrrResult {
            rate,
            effective_yield: effective_yield(rate, flows.last_day()),
            residual,
            method: IrrMethod::Numerical {
                bracket,
                iterations: result.iterations,
            },
        })
    }
}

/// Closed-form rate of a stream whose only non-zero flows are its first and
/// last ones.
///
/// With `c0` the first and `c1` the last non-zero flow and `d` the last day
/// offset, the rate is `(365 / d) · ln(-c1 / c0)` and the effective yield is
/// `-c1 / c0 - 1`.
///
/// # Errors
///
/// `DomainError` when `c1 / c0` is not negative (the logarithm is undefined)
/// or when no days elapse; `InsufficientCashflows` when there is no
/// non-zero flow at all.
pub fn simple_irr_solve(flows: &EffectiveCashflow) -> PerformanceResult<IrrResult> {
    let mut non_zero = flows.amounts().iter().copied().filter(|a| *a != 0.0);
    let (Some(c0), Some(c1)) = (non_zero.next(), non_zero.next_back()) else {
        return Err(PerformanceError::InsufficientCashflows {
            non_zero: flows.non_zero_count(),
        });
    };

    let days = flows.last_day();
    if days == 0 {
        return Err(PerformanceError::domain("no days elapsed between flows"));
    }

    let ratio = c1 / c0;
    // Also rejects NaN
    if !(ratio < 0.0) {
        return Err(PerformanceError::domain(format!(
            "end/start flow ratio {ratio} is not negative"
        )));
    }

    let rate = DAYS_PER_YEAR / days as f64 * (-ratio).ln();
    debug!(rate, days, "closed-form IRR");

    Ok(IrrResult {
        rate,
        effective_yield: -ratio - 1.0,
        residual: npv(flows.days(), flows.amounts(), rate),
        method: IrrMethod::ClosedForm,
    })
}

/// Solves `flows` with the default solver settings.
pub fn solve_irr(flows: &EffectiveCashflow) -> PerformanceResult<IrrResult> {
    IrrSolver::new().solve(flows)
}
