//! # Kepler equation solvers
//!
//! Two forms of Kepler's equation are solved with the shared Newton kernel
//! ([`crate::root_finder::newton_raphson`]):
//!
//! - **Classical** – `E − e·sin E − Mₑ = 0` for the eccentric anomaly `E` of an elliptic
//!   orbit, from the Prussing–Conway initial guess `Mₑ ± e/2`.
//! - **Universal** – the universal-variable Kepler equation for the universal anomaly `χ`
//!   after an elapsed time `dt`, valid for elliptic, parabolic and hyperbolic motion alike.
//!   The initial guess follows Chobotov: `χ₀ = √μ·|α|·dt`.
//!
//! The universal solver returns `χ` together with the Stumpff values `C(z)`, `S(z)` and
//! `z = αχ²` evaluated at the returned `χ`; the state propagator needs all four to build
//! the Lagrange coefficients.
use std::f64::consts::PI;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::Radian;
use crate::omt_errors::OmtError;
use crate::root_finder::{newton_raphson, NewtonParams};
use crate::stumpff::{stumpff_c, stumpff_s};

/// Solve the classical Kepler equation for the eccentric anomaly.
///
/// Arguments
/// -----------------
/// * `e` – eccentricity, expected in `[0, 1)`.
/// * `mean_anomaly` – mean anomaly `Mₑ` in radians.
/// * `params` – Newton budget and tolerance.
///
/// Return
/// ----------
/// * `Ok(E)` – eccentric anomaly in radians.
/// * `Err(OmtError::IterationLimitReached)` – no convergence within `params.max_iter`.
///
/// Notes
/// ----------
/// An eccentricity outside `[0, 1)` (including NaN) has no elliptic solution: it is reported
/// as `IterationLimitReached` with zero iterations and a NaN last step, before any Newton
/// step is taken.
pub fn solve_kepler_eccentric(
    e: f64,
    mean_anomaly: Radian,
    params: &NewtonParams,
) -> Result<Radian, OmtError> {
    if !(0.0..1.0).contains(&e) {
        warn!("classical Kepler equation called with out-of-domain eccentricity {e}");
        return Err(OmtError::IterationLimitReached {
            iterations: 0,
            last_step: f64::NAN,
        });
    }

    // Prussing & Conway (1993)
    let e0 = if mean_anomaly < PI {
        mean_anomaly + e / 2.0
    } else {
        mean_anomaly - e / 2.0
    };

    let root = newton_raphson(e0, params, |ecc| {
        (
            ecc - e * ecc.sin() - mean_anomaly,
            1.0 - e * ecc.cos(),
        )
    })?;

    debug!(
        "classical Kepler solved: e = {e}, M = {mean_anomaly}, E = {} ({} iterations)",
        root.value, root.iterations
    );
    Ok(root.value)
}

/// Universal anomaly and the auxiliary Stumpff values at convergence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniversalAnomaly {
    /// Universal anomaly χ (km^0.5)
    pub chi: f64,
    /// Stumpff C(z)
    pub c: f64,
    /// Stumpff S(z)
    pub s: f64,
    /// z = α·χ²
    pub z: f64,
}

impl UniversalAnomaly {
    fn at(chi: f64, alpha: f64) -> Self {
        let z = alpha * chi * chi;
        UniversalAnomaly {
            chi,
            c: stumpff_c(z),
            s: stumpff_s(z),
            z,
        }
    }
}

/// Solve the universal Kepler equation for the universal anomaly χ.
///
/// ```text
/// f(χ)  = (r₀·v_r0/√μ)·χ²·C(z) + (1 − α·r₀)·χ³·S(z) + r₀·χ − √μ·Δt
/// f'(χ) = (r₀·v_r0/√μ)·χ·(1 − z·S(z)) + (1 − α·r₀)·χ²·C(z) + r₀
/// ```
///
/// `C(z)` and `S(z)` are recomputed from the current χ at every iteration.
///
/// Arguments
/// -----------------
/// * `dt` – elapsed time (s).
/// * `r0` – initial radius (km).
/// * `vr0` – initial radial velocity (km/s).
/// * `alpha` – reciprocal of the semi-major axis (1/km); positive for ellipses,
///   zero for parabolas, negative for hyperbolas.
/// * `mu` – gravitational parameter (km³/s²).
/// * `params` – Newton budget and tolerance.
///
/// Return
/// ----------
/// * `Ok(UniversalAnomaly)` – χ and the Stumpff values belonging to it.
/// * `Err(OmtError::IterationLimitReached)` – no convergence within `params.max_iter`.
pub fn solve_kepler_universal(
    dt: f64,
    r0: f64,
    vr0: f64,
    alpha: f64,
    mu: f64,
    params: &NewtonParams,
) -> Result<UniversalAnomaly, OmtError> {
    let sqmu = mu.sqrt();
    // Chobotov (2002)
    let chi0 = sqmu * alpha.abs() * dt;

    let mut last = UniversalAnomaly::at(chi0, alpha);
    let root = newton_raphson(chi0, params, |chi| {
        last = UniversalAnomaly::at(chi, alpha);
        let chisq = chi * chi;
        let f = (r0 * vr0 / sqmu) * chisq * last.c
            + (1.0 - alpha * r0) * chi * chisq * last.s
            + r0 * chi
            - sqmu * dt;
        let fprime = (r0 * vr0 / sqmu) * chi * (1.0 - last.z * last.s)
            + (1.0 - alpha * r0) * chisq * last.c
            + r0;
        (f, fprime)
    })?;

    debug!(
        "universal Kepler solved: dt = {dt}, chi = {} ({} iterations)",
        root.value, root.iterations
    );
    Ok(last)
}
