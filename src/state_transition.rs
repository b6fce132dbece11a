//! # Two-body state propagation
//!
//! Advances a state vector by an elapsed time with the universal-variable formulation and
//! Lagrange coefficients:
//!
//! ```text
//! α  = 2/r₀ − v₀²/μ                      (reciprocal semi-major axis)
//! χ, C, S                                (universal Kepler equation)
//! f  = 1 − χ²·C / r₀                     g  = Δt − χ³·S / √μ
//! r  = f·r₀ + g·v₀
//! ḟ  = √μ / (r·r₀) · (α·χ³·S − χ)         ġ = 1 − χ²·C / r
//! v  = ḟ·r₀ + ġ·v₀
//! ```
//!
//! One formulation covers ellipses, parabolas and hyperbolas; nothing here branches on
//! the orbit type.
use log::debug;

use crate::constants::{GravParam, Second};
use crate::kepler::solve_kepler_universal;
use crate::omt_errors::{check_mu, OmtError};
use crate::orbit_type::state_vector::StateVector;
use crate::root_finder::NewtonParams;

/// Lagrange coefficients `f, g, ḟ, ġ` mapping an initial state to a propagated one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangeCoefficients {
    pub f: f64,
    pub g: f64,
    pub fdot: f64,
    pub gdot: f64,
}

impl LagrangeCoefficients {
    /// Apply the coefficients to an initial state.
    pub fn apply(&self, initial: &StateVector) -> StateVector {
        StateVector::new(
            self.f * initial.position + self.g * initial.velocity,
            self.fdot * initial.position + self.gdot * initial.velocity,
        )
    }
}

/// Propagate a two-body state by `dt` seconds.
///
/// Arguments
/// -----------------
/// * `state` – initial position (km) and velocity (km/s).
/// * `dt` – elapsed time (s); negative values propagate backwards.
/// * `mu` – gravitational parameter (km³/s²).
/// * `params` – Newton budget and tolerance for the universal Kepler solve.
///
/// Return
/// ----------
/// * `Ok(StateVector)` – the propagated state.
/// * `Err(OmtError::InvalidOrbitalInput)` – non-positive `mu` or a state at the origin.
/// * `Err(OmtError::IterationLimitReached)` – the universal Kepler solve did not converge.
///
/// # Example
///
/// ```rust
/// use nalgebra::Vector3;
/// use omt::orbit_type::state_vector::StateVector;
/// use omt::root_finder::NewtonParams;
/// use omt::state_transition::propagate;
///
/// let mu = 398_600.0;
/// let r = 7000.0_f64;
/// let state = StateVector::new(Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, (mu / r).sqrt(), 0.0));
/// let period = 2.0 * std::f64::consts::PI * (r.powi(3) / mu).sqrt();
/// let back = propagate(&state, period, mu, &NewtonParams::default()).unwrap();
/// assert!((back.position - state.position).norm() < 1e-6);
/// ```
pub fn propagate(
    state: &StateVector,
    dt: Second,
    mu: GravParam,
    params: &NewtonParams,
) -> Result<StateVector, OmtError> {
    Ok(lagrange_coefficients(state, dt, mu, params)?.apply(state))
}

/// Lagrange coefficients for a propagation of `dt` seconds from `state`.
///
/// See [`propagate`] for arguments and failures.
pub fn lagrange_coefficients(
    state: &StateVector,
    dt: Second,
    mu: GravParam,
    params: &NewtonParams,
) -> Result<LagrangeCoefficients, OmtError> {
    check_mu(mu)?;
    let r0 = state.radius();
    if r0 <= 0.0 || !state.is_finite() {
        return Err(OmtError::InvalidOrbitalInput(format!(
            "cannot propagate from state {state}"
        )));
    }

    let v0 = state.speed();
    let vr0 = state.radial_velocity();
    let alpha = 2.0 / r0 - v0 * v0 / mu;

    let ua = solve_kepler_universal(dt, r0, vr0, alpha, mu, params)?;
    let chisq = ua.chi * ua.chi;
    let chicube = chisq * ua.chi;
    let sqmu = mu.sqrt();

    let f = 1.0 - chisq / r0 * ua.c;
    let g = dt - chicube * ua.s / sqmu;
    let r = (f * state.position + g * state.velocity).norm();
    let fdot = sqmu / (r * r0) * (alpha * chicube * ua.s - ua.chi);
    let gdot = 1.0 - chisq * ua.c / r;

    debug!("propagated {dt} s: alpha = {alpha:e}, chi = {}, r = {r}", ua.chi);
    Ok(LagrangeCoefficients { f, g, fdot, gdot })
}
