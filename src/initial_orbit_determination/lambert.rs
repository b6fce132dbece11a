//! # Lambert's problem
//!
//! Transfer orbit between two positions for a given time of flight, solved with universal
//! variables (Curtis, Algorithm 5.2).
//!
//! ```text
//! A    = sin Δθ · √(r₁·r₂ / (1 − cos Δθ))
//! y(z) = r₁ + r₂ + A·(z·S(z) − 1) / √C(z)
//! F(z) = (y/C)^1.5 · S + A·√y − √μ·Δt
//! ```
//!
//! `F(z) = 0` is solved for `z` with the Newton kernel from `z₀ = 0`. The derivative has a
//! removable singularity at `z = 0`; its closed form is used for `|z| > err_tol` and the
//! series limit otherwise:
//!
//! ```text
//! F'(z) = (y/C)^1.5 · [ (C − 1.5·S/C)/(2z) + 0.75·S²/C ] + A/8 · [ 3·S/C·√y + A·√(C/y) ]
//! F'(0) = √2/40 · y^1.5 + A/8 · [ √y + A·√(1/(2y)) ]
//! ```
//!
//! Iterates are kept inside the solution domain: `z` stays under `4π²` (where `C` vanishes)
//! and a step leading to `y < 0` is halved back toward the current iterate.
//!
//! Velocities follow from the Lagrange coefficients `f = 1 − y/r₁`, `g = A·√(y/μ)`,
//! `ġ = 1 − y/r₂`:
//!
//! ```text
//! v₁ = (r₂ − f·r₁) / g        v₂ = (ġ·r₂ − r₁) / g
//! ```
use std::f64::consts::PI;

use log::{debug, warn};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{GravParam, Second, DEGENERACY_TOL, DPI};
use crate::omt_errors::{check_mu, OmtError};
use crate::orbit_type::{OrbitalElementSet, StateVector};
use crate::root_finder::{newton_raphson_guarded, NewtonParams};
use crate::stumpff::{stumpff_c, stumpff_s};

/// Upper bound of the universal variable: `C(4π²) = 0`.
const Z_MAX: f64 = 4.0 * PI * PI;

/// Maximum number of halvings applied to a step that leaves the `y ≥ 0` domain.
const MAX_HALVINGS: usize = 64;

/// Sense of the transfer around the orbit normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferDirection {
    /// Counter-clockwise seen from +z (`h_z > 0`).
    Prograde,
    /// Clockwise seen from +z (`h_z < 0`).
    Retrograde,
}

/// Velocities at both ends of a Lambert transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LambertSolution {
    /// Departure velocity at `r1` (km/s).
    pub v1: Vector3<f64>,
    /// Arrival velocity at `r2` (km/s).
    pub v2: Vector3<f64>,
    /// Converged universal variable `z = α·χ²`.
    pub z: f64,
    /// Transfer angle Δθ in `[0, 2π)`.
    pub transfer_angle: f64,
    /// Newton iterations used.
    pub iterations: usize,
}

impl LambertSolution {
    /// State at departure.
    pub fn departure(&self, r1: &Vector3<f64>) -> StateVector {
        StateVector::new(*r1, self.v1)
    }

    /// State at arrival.
    pub fn arrival(&self, r2: &Vector3<f64>) -> StateVector {
        StateVector::new(*r2, self.v2)
    }
}

/// Transfer angle from `r1` to `r2` for the requested direction.
///
/// | direction | `(r₁ × r₂)_z ≥ 0` | `(r₁ × r₂)_z < 0` |
/// |---|---|---|
/// | prograde | `acos(r̂₁·r̂₂)` | `2π − acos(r̂₁·r̂₂)` |
/// | retrograde | `2π − acos(r̂₁·r̂₂)` | `acos(r̂₁·r̂₂)` |
fn transfer_angle(r1: &Vector3<f64>, r2: &Vector3<f64>, direction: TransferDirection) -> f64 {
    let cos_dtheta = (r1.dot(r2) / (r1.norm() * r2.norm())).clamp(-1.0, 1.0);
    let dtheta = cos_dtheta.acos();
    let normal_z = r1.cross(r2).z;
    let short_way = match direction {
        TransferDirection::Prograde => normal_z >= 0.0,
        TransferDirection::Retrograde => normal_z < 0.0,
    };
    if short_way {
        dtheta
    } else {
        DPI - dtheta
    }
}

/// Solve Lambert's problem.
///
/// Arguments
/// -----------------
/// * `r1`, `r2` – departure and arrival positions (km).
/// * `dt` – time of flight (s), strictly positive.
/// * `direction` – prograde or retrograde transfer.
/// * `mu` – gravitational parameter (km³/s²).
/// * `params` – Newton budget and tolerance for the `z` iteration.
///
/// Return
/// ----------
/// * `Ok(LambertSolution)` – velocities at both ends.
/// * `Err(OmtError::InvalidOrbitalInput)` – invalid `mu`, `dt ≤ 0`, zero or non-finite positions.
/// * `Err(OmtError::DegenerateGeometry)` – `Δθ` at `0` or `π` (transfer plane undefined)
///   or a non-finite transfer state.
/// * `Err(OmtError::IterationLimitReached)` – the `z` iteration did not converge.
pub fn lambert(
    r1: &Vector3<f64>,
    r2: &Vector3<f64>,
    dt: Second,
    direction: TransferDirection,
    mu: GravParam,
    params: &NewtonParams,
) -> Result<LambertSolution, OmtError> {
    check_mu(mu)?;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(OmtError::InvalidOrbitalInput(format!(
            "time of flight must be positive, got {dt}"
        )));
    }
    let (r1n, r2n) = (r1.norm(), r2.norm());
    if !(r1n.is_finite() && r1n > 0.0 && r2n.is_finite() && r2n > 0.0) {
        return Err(OmtError::InvalidOrbitalInput(format!(
            "Lambert endpoints with norms {r1n} and {r2n}"
        )));
    }

    let dtheta = transfer_angle(r1, r2, direction);
    let (sin_dt, cos_dt) = dtheta.sin_cos();
    if sin_dt.abs() < DEGENERACY_TOL || 1.0 - cos_dt < DEGENERACY_TOL {
        warn!("Lambert: transfer angle {dtheta} leaves the transfer plane undefined");
        return Err(OmtError::DegenerateGeometry(format!(
            "Lambert transfer angle {dtheta} rad is collinear with the endpoints"
        )));
    }
    let a = sin_dt * (r1n * r2n / (1.0 - cos_dt)).sqrt();
    let sqmu = mu.sqrt();

    let y = |z: f64| r1n + r2n + a * (z * stumpff_s(z) - 1.0) / stumpff_c(z).sqrt();

    let eval = |z: f64| {
        let (c, s) = (stumpff_c(z), stumpff_s(z));
        let yz = y(z);
        let f = (yz / c).powf(1.5) * s + a * yz.sqrt() - sqmu * dt;
        let fprime = if z.abs() > params.err_tol {
            (yz / c).powf(1.5) * ((c - 1.5 * s / c) / (2.0 * z) + 0.75 * s * s / c)
                + a / 8.0 * (3.0 * s / c * yz.sqrt() + a * (c / yz).sqrt())
        } else {
            2f64.sqrt() / 40.0 * yz.powf(1.5) + a / 8.0 * (yz.sqrt() + a * (0.5 / yz).sqrt())
        };
        (f, fprime)
    };

    let guard = |current: f64, proposed: f64| {
        let mut next = if proposed >= Z_MAX {
            0.5 * (current + Z_MAX)
        } else {
            proposed
        };
        for _ in 0..MAX_HALVINGS {
            if y(next) >= 0.0 {
                break;
            }
            next = 0.5 * (current + next);
        }
        next
    };

    let root = newton_raphson_guarded(0.0, params, eval, guard)?;
    let z = root.value;
    let yz = y(z);

    let f = 1.0 - yz / r1n;
    let g = a * (yz / mu).sqrt();
    let gdot = 1.0 - yz / r2n;

    let v1 = (r2 - f * r1) / g;
    let v2 = (gdot * r2 - r1) / g;
    if !(v1.iter().chain(v2.iter()).all(|c| c.is_finite())) {
        warn!("Lambert: non-finite transfer velocity at z = {z}, y = {yz}");
        return Err(OmtError::DegenerateGeometry(format!(
            "Lambert transfer has no finite solution (z = {z}, y = {yz})"
        )));
    }

    debug!(
        "Lambert solved: dtheta = {dtheta}, z = {z} ({} iterations)",
        root.iterations
    );
    Ok(LambertSolution {
        v1,
        v2,
        z,
        transfer_angle: dtheta,
        iterations: root.iterations,
    })
}

impl OrbitalElementSet {
    /// Orbital elements of the Lambert transfer orbit.
    ///
    /// The elements are derived from the departure state, so the true anomaly refers to `r1`.
    pub fn from_lambert(
        r1: &Vector3<f64>,
        r2: &Vector3<f64>,
        dt: Second,
        direction: TransferDirection,
        mu: GravParam,
        params: &NewtonParams,
    ) -> Result<Self, OmtError> {
        let solution = lambert(r1, r2, dt, direction, mu, params)?;
        Self::from_state_vectors(&solution.departure(r1), mu)
    }
}

#[cfg(test)]
mod lambert_test {
    use super::*;
    use crate::constants::MU_EARTH;
    use crate::state_transition::propagate;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_3;

    const R: f64 = 7000.0;

    /// Circular equatorial orbit of radius `R`; `sense = -1` runs clockwise.
    fn circular(angle: f64, sense: f64) -> StateVector {
        let vc = (MU_EARTH / R).sqrt();
        let (s, c) = angle.sin_cos();
        StateVector::new(
            Vector3::new(R * c, R * s, 0.0),
            sense * Vector3::new(-vc * s, vc * c, 0.0),
        )
    }

    fn time_for(angle: f64) -> f64 {
        angle / (MU_EARTH / R.powi(3)).sqrt()
    }

    #[test]
    fn test_curtis_example_5_2() {
        let r1 = Vector3::new(5000.0, 10_000.0, 2100.0);
        let r2 = Vector3::new(-14_600.0, 2500.0, 7000.0);
        let sol = lambert(
            &r1,
            &r2,
            3600.0,
            TransferDirection::Prograde,
            MU_EARTH,
            &NewtonParams::default(),
        )
        .unwrap();
        assert_abs_diff_eq!(sol.v1, Vector3::new(-5.9925, 1.9254, 3.2456), epsilon = 1e-3);
        assert_abs_diff_eq!(sol.v2, Vector3::new(-3.3125, -4.1966, -0.38529), epsilon = 1e-3);
        assert_abs_diff_eq!(sol.z, 1.5398, epsilon = 1e-3);
    }

    #[test]
    fn test_prograde_short_and_long_way() {
        let params = NewtonParams::default();
        for dtheta in [FRAC_PI_3, 4.0 * FRAC_PI_3] {
            let start = circular(0.0, 1.0);
            let end = circular(dtheta, 1.0);
            let sol = lambert(
                &start.position,
                &end.position,
                time_for(dtheta),
                TransferDirection::Prograde,
                MU_EARTH,
                &params,
            )
            .unwrap();
            assert_abs_diff_eq!(sol.transfer_angle, dtheta, epsilon = 1e-12);
            assert_abs_diff_eq!(sol.v1, start.velocity, epsilon = 1e-6);
            assert_abs_diff_eq!(sol.v2, end.velocity, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_retrograde_takes_complementary_arc() {
        let params = NewtonParams::default();
        // clockwise: from 0 to −60° (short way), then from 120° to 240° the long way round
        for (from, to, dtheta) in [
            (0.0, -FRAC_PI_3, FRAC_PI_3),
            (2.0 * FRAC_PI_3, -2.0 * FRAC_PI_3, 4.0 * FRAC_PI_3),
        ] {
            let start = circular(from, -1.0);
            let end = circular(to, -1.0);
            let sol = lambert(
                &start.position,
                &end.position,
                time_for(dtheta),
                TransferDirection::Retrograde,
                MU_EARTH,
                &params,
            )
            .unwrap();
            assert_abs_diff_eq!(sol.transfer_angle, dtheta, epsilon = 1e-12);
            assert_abs_diff_eq!(sol.v1, start.velocity, epsilon = 1e-6);
            assert_abs_diff_eq!(sol.v2, end.velocity, epsilon = 1e-6);
            assert!(sol.v1.cross(&start.position).z > 0.0);
        }
    }

    #[test]
    fn test_matches_propagated_ellipse() {
        let params = NewtonParams::default();
        let start = StateVector::new(
            Vector3::new(7000.0, 1000.0, -500.0),
            Vector3::new(-1.0, 7.2, 2.5),
        );
        for dt in [2000.0, 4000.0] {
            let end = propagate(&start, dt, MU_EARTH, &params).unwrap();
            let sol = lambert(
                &start.position,
                &end.position,
                dt,
                TransferDirection::Prograde,
                MU_EARTH,
                &params,
            )
            .unwrap();
            assert_relative_eq!(sol.v1, start.velocity, max_relative = 1e-7);
            assert_relative_eq!(sol.v2, end.velocity, max_relative = 1e-7);
        }

        let elem = OrbitalElementSet::from_lambert(
            &start.position,
            &propagate(&start, 2000.0, MU_EARTH, &params).unwrap().position,
            2000.0,
            TransferDirection::Prograde,
            MU_EARTH,
            &params,
        )
        .unwrap();
        let direct = OrbitalElementSet::from_state_vectors(&start, MU_EARTH).unwrap();
        assert_relative_eq!(elem.eccentricity(), direct.eccentricity(), max_relative = 1e-6);
        assert_relative_eq!(elem.period(), direct.period(), max_relative = 1e-6);
    }

    #[test]
    fn test_degenerate_and_invalid_inputs() {
        let params = NewtonParams::default();
        let r1 = Vector3::new(7000.0, 0.0, 0.0);
        let opposite = Vector3::new(-8000.0, 0.0, 0.0);
        let err = lambert(&r1, &opposite, 3000.0, TransferDirection::Prograde, MU_EARTH, &params)
            .unwrap_err();
        assert!(err.is_degenerate());

        let same_line = Vector3::new(9000.0, 0.0, 0.0);
        assert!(
            lambert(&r1, &same_line, 3000.0, TransferDirection::Prograde, MU_EARTH, &params)
                .unwrap_err()
                .is_degenerate()
        );

        // 1 − cos Δθ ≈ 5e-13 falls under DEGENERACY_TOL although sin Δθ does not
        let tiny = 1e-6_f64;
        let nearly_same = Vector3::new(9000.0 * tiny.cos(), 9000.0 * tiny.sin(), 0.0);
        assert!(
            lambert(&r1, &nearly_same, 3000.0, TransferDirection::Prograde, MU_EARTH, &params)
                .unwrap_err()
                .is_degenerate()
        );

        let r2 = Vector3::new(0.0, 7000.0, 0.0);
        assert!(matches!(
            lambert(&r1, &r2, 0.0, TransferDirection::Prograde, MU_EARTH, &params),
            Err(OmtError::InvalidOrbitalInput(_))
        ));
        assert!(matches!(
            lambert(&r1, &r2, -10.0, TransferDirection::Prograde, MU_EARTH, &params),
            Err(OmtError::InvalidOrbitalInput(_))
        ));
    }

    #[test]
    fn test_solution_serializes() {
        let r1 = Vector3::new(5000.0, 10_000.0, 2100.0);
        let r2 = Vector3::new(-14_600.0, 2500.0, 7000.0);
        let sol = lambert(
            &r1,
            &r2,
            3600.0,
            TransferDirection::Prograde,
            MU_EARTH,
            &NewtonParams::default(),
        )
        .unwrap();
        let json = serde_json::to_value(sol).unwrap();
        assert!(json.get("v1").is_some());
        assert!(json.get("transfer_angle").is_some());
        let back: LambertSolution = serde_json::from_value(json).unwrap();
        assert_eq!(back.iterations, sol.iterations);
    }
}
