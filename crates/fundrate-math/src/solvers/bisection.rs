//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::brent::brackets_root;
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket, keeping the half whose endpoints still have
/// opposite signs. Slower than [`brent`](super::brent) but immune to badly
/// scaled functions, which makes it a useful cross-check.
///
/// Requires: `f(a)` and `f(b)` of opposite sign (or one of them zero).
///
/// # Example
///
/// ```rust
/// use fundrate_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !brackets_root(f_lo, f_hi) {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance || f_lo == 0.0 {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance || f_hi == 0.0 {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid.is_nan() {
            return Err(MathError::convergence_failed(iteration + 1, f64::NAN));
        }

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if (f_mid < 0.0) == (f_lo < 0.0) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    let mid = 0.5 * (lo + hi);
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}
