//! # Angle conversions
//!
//! Helpers shared by the orbit descriptor, the frame transforms and the ground track:
//!
//! - [`principal_angle`] – reduce an angle to `[0, 2π)`.
//! - [`resolve_quadrant`] – recover a full-circle angle from its cosine and the sign of a
//!   reference component. Right ascension, the ascending node, the argument of perigee and
//!   the true anomaly all go through this helper so they share one tie-break rule.
//! - Anomaly conversions between true (θ), eccentric (E) and mean (Mₑ) anomalies on an
//!   elliptic orbit.
use crate::constants::{Radian, DPI};

/// Reduce an angle to its principal value in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    let r = a.rem_euclid(DPI);
    // rem_euclid may round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Full-circle angle from its cosine and the sign of a reference component.
///
/// Returns `acos(cos_value)` when `reference ≥ 0` and `2π − acos(cos_value)` when
/// `reference < 0`, normalized to `[0, 2π)`. A reference of exactly zero keeps the
/// principal `acos` value. The cosine is clamped to `[-1, 1]` so that rounding on unit
/// vectors never produces NaN.
///
/// Arguments
/// -----------------
/// * `cos_value` – cosine of the sought angle.
/// * `reference` – component whose sign tells which half-plane the angle lies in
///   (e.g. the y-component of the node line for Ω, the z-component of the eccentricity
///   vector for ω, the radial velocity for θ).
pub fn resolve_quadrant(cos_value: f64, reference: f64) -> Radian {
    let angle = cos_value.clamp(-1.0, 1.0).acos();
    if reference < 0.0 {
        principal_angle(DPI - angle)
    } else {
        angle
    }
}

/// Eccentric anomaly from the true anomaly on an elliptic orbit.
///
/// Uses the half-angle relation `tan(E/2) = √((1−e)/(1+e)) · tan(θ/2)` in its `atan2`
/// form, which stays finite at `θ = π`. The result is in `[0, 2π)`.
pub fn true_to_eccentric_anomaly(theta: Radian, e: f64) -> Radian {
    let half = 0.5 * theta;
    principal_angle(2.0 * ((1.0 - e).sqrt() * half.sin()).atan2((1.0 + e).sqrt() * half.cos()))
}

/// True anomaly from the eccentric anomaly on an elliptic orbit, in `[0, 2π)`.
pub fn eccentric_to_true_anomaly(ecc_anomaly: Radian, e: f64) -> Radian {
    let half = 0.5 * ecc_anomaly;
    principal_angle(2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos()))
}

/// Mean anomaly from the eccentric anomaly (Kepler's equation `Mₑ = E − e·sin E`).
pub fn eccentric_to_mean_anomaly(ecc_anomaly: Radian, e: f64) -> Radian {
    ecc_anomaly - e * ecc_anomaly.sin()
}
