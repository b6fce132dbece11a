//! # Newton–Raphson root finder
//!
//! This module provides the single scalar Newton iteration shared by every solver of the
//! toolbox (classical Kepler, universal Kepler, Lambert), together with the
//! [`NewtonParams`] configuration object that carries its iteration budget and tolerance.
//!
//! ## Iteration
//!
//! Starting from an analytic initial guess `x₀`, the kernel evaluates `f(x)` and `f'(x)`
//! through a caller-supplied closure and iterates
//!
//! ```text
//! step = f(x) / f'(x)
//! if |step| < err_tol  → converged, return x
//! x ← x − step
//! ```
//!
//! The returned value is the iterate at which the step fell under the tolerance, so any
//! auxiliary quantity the closure computed on its last call belongs to the returned root.
//!
//! When `max_iter` evaluations pass without convergence the kernel returns
//! [`OmtError::IterationLimitReached`]; the last iterate is never handed back as a
//! best-effort value.
//!
//! ## Example
//!
//! ```rust
//! use omt::root_finder::{newton_raphson, NewtonParams};
//!
//! // √2 as the positive root of x² − 2
//! let root = newton_raphson(1.0, &NewtonParams::default(), |x| (x * x - 2.0, 2.0 * x)).unwrap();
//! assert!((root.value - 2f64.sqrt()).abs() < 1e-12);
//! ```
use std::cmp::Ordering::Greater;
use std::fmt;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_TOL, MAX_ITER};
use crate::omt_errors::OmtError;

/// Configuration of the Newton–Raphson kernel.
///
/// Fields
/// -----------------
/// * `max_iter` – maximum number of function evaluations before the solve is declared failed.
/// * `err_tol` – absolute tolerance on the Newton step `f/f'`.
///
/// Defaults
/// -----------------
/// * `max_iter`: [`MAX_ITER`] (1000)
/// * `err_tol`: [`ERR_TOL`] (1e-8)
///
/// Analytic initial guesses (Prussing–Conway for the classical Kepler equation,
/// Chobotov for the universal one) keep typical solves to a handful of iterations;
/// the budget only bounds pathological inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonParams {
    pub max_iter: usize,
    pub err_tol: f64,
}

impl NewtonParams {
    /// Construct a new [`NewtonParams`] with the default budget and tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`NewtonParamsBuilder`] to configure custom parameters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use omt::root_finder::NewtonParams;
    ///
    /// let params = NewtonParams::builder()
    ///     .max_iter(50)
    ///     .err_tol(1e-12)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.max_iter, 50);
    /// ```
    pub fn builder() -> NewtonParamsBuilder {
        NewtonParamsBuilder::new()
    }
}

impl Default for NewtonParams {
    fn default() -> Self {
        NewtonParams {
            max_iter: MAX_ITER,
            err_tol: ERR_TOL,
        }
    }
}

/// Builder for [`NewtonParams`], with validation.
#[derive(Debug, Clone)]
pub struct NewtonParamsBuilder {
    params: NewtonParams,
}

impl Default for NewtonParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewtonParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: NewtonParams::default(),
        }
    }

    pub fn max_iter(mut self, v: usize) -> Self {
        self.params.max_iter = v;
        self
    }

    pub fn err_tol(mut self, v: f64) -> Self {
        self.params.err_tol = v;
        self
    }

    /// Finalize the builder and produce a [`NewtonParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `max_iter ≥ 1`
    /// * `err_tol > 0` and finite (NaN is rejected)
    ///
    /// Returns
    /// -----------------
    /// * `Ok(NewtonParams)` if all values are valid.
    /// * `Err(OmtError::InvalidSolverParameter)` otherwise.
    pub fn build(self) -> Result<NewtonParams, OmtError> {
        let p = &self.params;

        if p.max_iter == 0 {
            return Err(OmtError::InvalidSolverParameter(
                "max_iter must be >= 1".into(),
            ));
        }
        if p.err_tol.partial_cmp(&0.0) != Some(Greater) || !p.err_tol.is_finite() {
            return Err(OmtError::InvalidSolverParameter(
                "err_tol must be finite and > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for NewtonParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Newton–Raphson Parameters")?;
            writeln!(f, "-------------------------")?;
            writeln!(
                f,
                "  max_iter = {:<12}# Maximum number of iterations",
                self.max_iter
            )?;
            writeln!(
                f,
                "  err_tol  = {:<12.1e}# Absolute tolerance on the Newton step",
                self.err_tol
            )
        } else {
            write!(
                f,
                "NewtonParams(max_iter={}, err_tol={:.1e})",
                self.max_iter, self.err_tol
            )
        }
    }
}

/// Converged Newton root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRoot {
    /// Iterate at which the step fell under the tolerance.
    pub value: f64,
    /// Number of function evaluations performed.
    pub iterations: usize,
}

/// Solve `f(x) = 0` with Newton's method from the initial guess `x0`.
///
/// Arguments
/// -----------------
/// * `x0` – initial guess.
/// * `params` – iteration budget and tolerance.
/// * `eval` – closure returning `(f(x), f'(x))`.
///
/// Return
/// ----------
/// * `Ok(NewtonRoot)` when `|f/f'| < err_tol` within `max_iter` evaluations.
/// * `Err(OmtError::IterationLimitReached)` otherwise. A NaN step never satisfies the
///   tolerance, so non-finite evaluations also end in this error.
///
/// See also
/// ------------
/// * [`newton_raphson_guarded`] – same iteration with a hook to keep iterates in a valid domain.
pub fn newton_raphson<F>(x0: f64, params: &NewtonParams, eval: F) -> Result<NewtonRoot, OmtError>
where
    F: FnMut(f64) -> (f64, f64),
{
    newton_raphson_guarded(x0, params, eval, |_, proposed| proposed)
}

/// Newton iteration whose proposed iterates pass through a guard before being accepted.
///
/// The guard receives `(current, proposed)` and returns the iterate actually used for the
/// next evaluation. Solvers with a restricted domain (the Lambert `z` variable must stay
/// below `4π²` and keep `y ≥ 0`) use it to pull a step back inside that domain.
pub fn newton_raphson_guarded<F, G>(
    x0: f64,
    params: &NewtonParams,
    mut eval: F,
    mut guard: G,
) -> Result<NewtonRoot, OmtError>
where
    F: FnMut(f64) -> (f64, f64),
    G: FnMut(f64, f64) -> f64,
{
    let mut x = x0;
    let mut step = f64::NAN;

    for iter in 0..params.max_iter {
        let (f, fprime) = eval(x);
        step = f / fprime;
        trace!("newton iter {iter}: x = {x:e}, f = {f:e}, f' = {fprime:e}");

        if step.abs() < params.err_tol {
            return Ok(NewtonRoot {
                value: x,
                iterations: iter + 1,
            });
        }
        x = guard(x, x - step);
    }

    warn!(
        "Newton solve did not converge within {} iterations (last step {step:e})",
        params.max_iter
    );
    Err(OmtError::IterationLimitReached {
        iterations: params.max_iter,
        last_step: step,
    })
}

#[cfg(test)]
mod root_finder_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_params() {
        let params = NewtonParams::default();
        assert_eq!(params.max_iter, 1000);
        assert_eq!(params.err_tol, 1e-8);
        assert_eq!(NewtonParams::new(), params);
        assert_eq!(
            params.to_string(),
            "NewtonParams(max_iter=1000, err_tol=1.0e-8)"
        );
        assert!(format!("{params:#}").contains("max_iter = 1000"));
    }

    #[test]
    fn test_builder_validation() {
        let params = NewtonParams::builder()
            .max_iter(10)
            .err_tol(1e-12)
            .build()
            .unwrap();
        assert_eq!(params.max_iter, 10);
        assert_eq!(params.err_tol, 1e-12);

        assert!(matches!(
            NewtonParams::builder().max_iter(0).build(),
            Err(OmtError::InvalidSolverParameter(_))
        ));
        assert!(NewtonParams::builder().err_tol(0.0).build().is_err());
        assert!(NewtonParams::builder().err_tol(-1e-3).build().is_err());
        assert!(NewtonParams::builder().err_tol(f64::NAN).build().is_err());
        assert!(NewtonParams::builder().err_tol(f64::INFINITY).build().is_err());
    }

    #[test]
    fn test_converges_on_sqrt_two() {
        let root = newton_raphson(1.0, &NewtonParams::default(), |x| (x * x - 2.0, 2.0 * x))
            .unwrap();
        assert_abs_diff_eq!(root.value, 2f64.sqrt(), epsilon = 1e-12);
        assert!(root.iterations < 10);
    }

    #[test]
    fn test_returns_iterate_before_final_step() {
        // Already at the root: the first step is zero and x0 is returned untouched.
        let root = newton_raphson(3.0, &NewtonParams::default(), |x| (x - 3.0, 1.0)).unwrap();
        assert_eq!(root.value, 3.0);
        assert_eq!(root.iterations, 1);
    }

    #[test]
    fn test_iteration_limit_without_real_root() {
        // x² + 1 has no real root and |f/f'| >= 1 for every real x.
        let params = NewtonParams::default();
        let res = newton_raphson(0.5, &params, |x| (x * x + 1.0, 2.0 * x));
        match res {
            Err(OmtError::IterationLimitReached { iterations, .. }) => {
                assert_eq!(iterations, MAX_ITER)
            }
            other => panic!("expected iteration limit, got {other:?}"),
        }
    }

    #[test]
    fn test_guard_is_applied() {
        // Guard clamps every proposed iterate to x >= 1; the root of x - 0.5 is never reached.
        let params = NewtonParams::builder().max_iter(20).build().unwrap();
        let res = newton_raphson_guarded(2.0, &params, |x| (x - 0.5, 1.0), |_, p| p.max(1.0));
        assert!(matches!(
            res,
            Err(OmtError::IterationLimitReached { iterations: 20, .. })
        ));
    }
}
