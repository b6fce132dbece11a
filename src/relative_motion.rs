//! # Relative motion in the LVLH frame
//!
//! Position, velocity and acceleration of a target spacecraft seen from a chief spacecraft,
//! expressed in the chief's local-vertical/local-horizontal (LVLH) frame:
//!
//! * `î` – radial, along the chief position,
//! * `ĵ = k̂ × î` – along-track,
//! * `k̂` – along the chief angular momentum (cross-track).
//!
//! The frame rotates with angular velocity `Ω = h/r²` and angular acceleration
//! `Ω̇ = −2·(v·r)·Ω/r²`, so the relative kinematics carry the Coriolis and centripetal terms:
//!
//! ```text
//! r_rel = r₂ − r₁
//! v_rel = v₂ − v₁ − Ω × r_rel
//! a_rel = a₂ − a₁ − Ω̇ × r_rel − Ω × (Ω × r_rel) − 2·Ω × v_rel
//! ```
//!
//! Both spacecraft follow two-body motion, `a = −μ·r/|r|³`.
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{GravParam, EPS};
use crate::omt_errors::{check_mu, OmtError};
use crate::orbit_type::StateVector;
use crate::perturbations::two_body_acceleration;

/// Relative kinematics of a target in the chief's LVLH frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeState {
    /// Relative position (km).
    pub position: Vector3<f64>,
    /// Relative velocity (km/s).
    pub velocity: Vector3<f64>,
    /// Relative acceleration (km/s²).
    pub acceleration: Vector3<f64>,
}

/// Rotation from the inertial frame to the LVLH frame of `state`.
///
/// The rows of the matrix are `î`, `ĵ`, `k̂` expressed in the inertial frame.
///
/// Return
/// ----------
/// * `Err(OmtError::DegenerateGeometry)` – position at the origin or rectilinear motion.
pub fn lvlh_basis(state: &StateVector) -> Result<Matrix3<f64>, OmtError> {
    let r = state.radius();
    let h_vec = state.angular_momentum();
    let h = h_vec.norm();
    if !(r > 0.0 && h > EPS * r * state.speed()) {
        return Err(OmtError::DegenerateGeometry(format!(
            "LVLH frame undefined for state {state}"
        )));
    }
    let i = state.position / r;
    let k = h_vec / h;
    let j = k.cross(&i);
    Ok(Matrix3::from_rows(&[i.transpose(), j.transpose(), k.transpose()]))
}

/// Relative state of `target` with respect to `chief`, in the chief's LVLH frame.
///
/// Return
/// ----------
/// * `Err(OmtError::InvalidOrbitalInput)` – invalid `mu`, non-finite states or a target at
///   the origin.
/// * `Err(OmtError::DegenerateGeometry)` – the chief LVLH frame is undefined.
pub fn relative_state(
    chief: &StateVector,
    target: &StateVector,
    mu: GravParam,
) -> Result<RelativeState, OmtError> {
    check_mu(mu)?;
    if !(chief.is_finite() && target.is_finite() && target.radius() > 0.0) {
        return Err(OmtError::InvalidOrbitalInput(format!(
            "relative state of {target} from {chief}"
        )));
    }
    let q = lvlh_basis(chief)?;

    let r1 = chief.radius();
    let r1sq = r1 * r1;
    let omega = chief.angular_momentum() / r1sq;
    let omega_dot = -2.0 * chief.velocity.dot(&chief.position) * omega / r1sq;

    let a1 = two_body_acceleration(&chief.position, mu);
    let a2 = two_body_acceleration(&target.position, mu);

    let r_rel = target.position - chief.position;
    let v_rel = target.velocity - chief.velocity - omega.cross(&r_rel);
    let a_rel = a2
        - a1
        - omega_dot.cross(&r_rel)
        - omega.cross(&omega.cross(&r_rel))
        - 2.0 * omega.cross(&v_rel);

    Ok(RelativeState {
        position: q * r_rel,
        velocity: q * v_rel,
        acceleration: q * a_rel,
    })
}
