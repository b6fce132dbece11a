//! # Accelerations and maneuvers
//!
//! * [`two_body_acceleration`] – point-mass gravity `−μ·r/|r|³`.
//! * [`j2_perturbation`] – perturbing acceleration of an oblate body, in radial,
//!   transverse and normal components.
//! * [`plane_change_delta_v`] – impulse of a combined plane change.
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{GravParam, KmPerSec, Radian, EPS};
use crate::conversion::resolve_quadrant;
use crate::ground_track::OblateBody;
use crate::omt_errors::{check_mu, OmtError};
use crate::orbit_type::StateVector;

/// Point-mass gravitational acceleration at `r` (km/s²).
pub fn two_body_acceleration(r: &Vector3<f64>, mu: GravParam) -> Vector3<f64> {
    let rn = r.norm();
    -mu / (rn * rn * rn) * r
}

/// J2 perturbing acceleration (km/s²) split along the local orbital directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct J2Perturbation {
    /// Along `û_r = r/|r|`.
    pub radial: f64,
    /// Along `û_⊥ = ĥ × û_r`, in the orbital plane.
    pub transverse: f64,
    /// Along `ĥ`, normal to the orbital plane.
    pub normal: f64,
    /// Inertial direction of each component (`û_r`, `û_⊥`, `ĥ`).
    pub frame: [Vector3<f64>; 3],
}

impl J2Perturbation {
    /// The perturbing acceleration in the inertial frame.
    pub fn to_inertial(&self) -> Vector3<f64> {
        self.radial * self.frame[0] + self.transverse * self.frame[1] + self.normal * self.frame[2]
    }
}

/// J2 perturbing acceleration at a state.
///
/// ```text
/// k   = −(μ/r²)·(3/2)·(R/r)²·J₂
/// p_r = k·(1 − 3·sin² i·sin² u)
/// p_⊥ = k·sin² i·sin 2u
/// p_h = k·sin 2i·sin u
/// ```
///
/// `u = ω + θ` is the argument of latitude, measured from the node line in the direction of
/// motion. It is taken from the state directly, so circular orbits need no perigee. On
/// equatorial orbits `sin i = 0` and the value of `u` does not matter.
///
/// Return
/// ----------
/// * `Err(OmtError::InvalidOrbitalInput)` – invalid `mu`, a state at the origin.
/// * `Err(OmtError::DegenerateGeometry)` – rectilinear motion (no orbital plane).
pub fn j2_perturbation(
    state: &StateVector,
    mu: GravParam,
    body: &OblateBody,
) -> Result<J2Perturbation, OmtError> {
    check_mu(mu)?;
    let r = state.radius();
    if r <= 0.0 || !state.is_finite() {
        return Err(OmtError::InvalidOrbitalInput(format!(
            "J2 perturbation at state {state}"
        )));
    }
    let h_vec = state.angular_momentum();
    let h = h_vec.norm();
    if h <= EPS * r * state.speed() {
        return Err(OmtError::DegenerateGeometry(format!(
            "no orbital plane for state {state}"
        )));
    }

    let u_r = state.position / r;
    let h_hat = h_vec / h;
    let u_perp = h_hat.cross(&u_r);

    let inclination = h_hat.z.clamp(-1.0, 1.0).acos();
    let node = Vector3::new(-h_vec.y, h_vec.x, 0.0);
    let n = node.norm();
    let arg_latitude = if n / h < EPS {
        0.0
    } else {
        resolve_quadrant(node.dot(&u_r) / n, u_r.z)
    };

    let sin_i = inclination.sin();
    let sin_u = arg_latitude.sin();
    let ratio = body.equatorial_radius / r;
    let k = -(mu / (r * r)) * 1.5 * ratio * ratio * body.j2;

    let perturbation = J2Perturbation {
        radial: k * (1.0 - 3.0 * sin_i * sin_i * sin_u * sin_u),
        transverse: k * sin_i * sin_i * (2.0 * arg_latitude).sin(),
        normal: k * (2.0 * inclination).sin() * sin_u,
        frame: [u_r, u_perp, h_hat],
    };
    debug!("J2 perturbation at u = {arg_latitude}: {perturbation:?}");
    Ok(perturbation)
}

/// Impulse of a maneuver changing the speed from `v1` to `v2` while rotating the orbital
/// plane by `delta_i`:
///
/// ```text
/// Δv = √(v₁² + v₂² − 2·v₁·v₂·cos Δi)
/// ```
pub fn plane_change_delta_v(v1: KmPerSec, v2: KmPerSec, delta_i: Radian) -> KmPerSec {
    (v1 * v1 + v2 * v2 - 2.0 * v1 * v2 * delta_i.cos()).sqrt()
}
