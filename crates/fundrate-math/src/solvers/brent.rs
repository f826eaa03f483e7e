//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Keeps a bracket `[b, c]` around the root and, at each step, tries inverse
/// quadratic interpolation (or the secant step when only two distinct points
/// are available). The interpolated step is only accepted when it stays well
/// inside the bracket and shrinks faster than bisection would; otherwise the
/// bracket is halved.
///
/// Requires: `f(a)` and `f(b)` of opposite sign (or one of them zero). An
/// infinite endpoint value is accepted, a NaN one is not.
///
/// Converges when `|f(b)| < tolerance` or the bracket half-width falls below
/// `tolerance / 2` (plus a few ulps of `b`).
///
/// # Example
///
/// ```rust
/// use fundrate_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if !brackets_root(fa, fb) {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = 0.0_f64;
    let mut e = 0.0_f64;

    for iteration in 0..config.max_iterations {
        // Keep the root between b and c
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // b is always the best estimate so far
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let half = 0.5 * (c - b);

        if fb.abs() < config.tolerance || half.abs() <= tol || fb == 0.0 {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant
                (2.0 * half * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let interpolation_bound = 3.0 * half * q - (tol * q).abs();
            let previous_bound = (e * q).abs();

            if 2.0 * p < interpolation_bound.min(previous_bound) && (p / q).is_finite() {
                e = d;
                d = p / q;
            } else {
                d = half;
                e = d;
            }
        } else {
            d = half;
            e = d;
        }

        a = b;
        fa = fb;

        b += if d.abs() > tol { d } else { tol.copysign(half) };
        fb = f(b);

        if fb.is_nan() {
            return Err(MathError::convergence_failed(iteration + 1, f64::NAN));
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}

/// True if `fa` and `fb` are comparable and do not share a strict sign.
pub(crate) fn brackets_root(fa: f64, fb: f64) -> bool {
    let same_sign = (fa > 0.0 && fb > 0.0) || (fa < 0.0 && fb < 0.0);
    !(fa.is_nan() || fb.is_nan() || same_sign)
}
