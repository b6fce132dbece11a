//! # Ground track under J2 secular drift
//!
//! Longitude and latitude of a satellite over a rotating oblate body.
//!
//! ## Pipeline
//!
//! 1. True anomaly `θ₀` → eccentric anomaly → mean anomaly → time since perigee.
//! 2. Advance the time by `dt`, re-solve Kepler's equation, recover the new true anomaly.
//! 3. Drift `Ω` and `ω` with the secular J2 rates:
//!
//!    ```text
//!    k  = −(3/2)·√μ·J₂·R² / ((1 − e²)²·a^(7/2))
//!    Ω̇  = k·cos i
//!    ω̇  = k·(5/2·sin² i − 2)
//!    ```
//!
//! 4. Perifocal position → geocentric equatorial → body-fixed frame rotated by `ω_E·dt`.
//! 5. Right ascension and declination in the body-fixed frame are the longitude and latitude.
//!
//! The drifted orientation is returned in a new [`OrbitalElementSet`] inside the
//! [`GroundTrackPoint`]; the input element set is never modified.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Kilometer, Radian, Second, DPI, EARTH_EQUATORIAL_RADIUS, EARTH_J2, EARTH_ROTATION_RATE,
};
use crate::conversion::{
    eccentric_to_mean_anomaly, eccentric_to_true_anomaly, principal_angle,
    true_to_eccentric_anomaly,
};
use crate::kepler::solve_kepler_eccentric;
use crate::omt_errors::OmtError;
use crate::orbit_type::OrbitalElementSet;
use crate::ref_system::{inertial_to_rotating, right_ascension_declination, rotation_angle};
use crate::root_finder::NewtonParams;

/// Oblateness and rotation of the central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OblateBody {
    /// Second zonal harmonic.
    pub j2: f64,
    /// Equatorial radius (km).
    pub equatorial_radius: Kilometer,
    /// Sidereal rotation rate (rad/s).
    pub rotation_rate: f64,
}

impl OblateBody {
    pub const EARTH: OblateBody = OblateBody {
        j2: EARTH_J2,
        equatorial_radius: EARTH_EQUATORIAL_RADIUS,
        rotation_rate: EARTH_ROTATION_RATE,
    };
}

impl Default for OblateBody {
    fn default() -> Self {
        OblateBody::EARTH
    }
}

/// Secular drift rates of the node and perigee (rad/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct J2Rates {
    pub raan_rate: f64,
    pub arg_perigee_rate: f64,
}

/// Secular J2 rates of `Ω` and `ω` for a bound orbit.
///
/// Return
/// ----------
/// * `Err(OmtError::UnboundOrbit)` when `e ≥ 1`.
pub fn secular_j2_rates(
    elements: &OrbitalElementSet,
    body: &OblateBody,
) -> Result<J2Rates, OmtError> {
    let e = elements.eccentricity();
    if !elements.is_bound() {
        return Err(OmtError::UnboundOrbit(e));
    }
    let one_e2 = 1.0 - e * e;
    let k = -1.5 * elements.mu().sqrt() * body.j2 * body.equatorial_radius.powi(2)
        / (one_e2 * one_e2 * elements.semi_major_axis().powf(3.5));
    let sin_i = elements.inclination().sin();

    Ok(J2Rates {
        raan_rate: k * elements.inclination().cos(),
        arg_perigee_rate: k * (2.5 * sin_i * sin_i - 2.0),
    })
}

/// One sample of a ground track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundTrackPoint {
    /// Longitude in the body-fixed frame, in `[0, 2π)`.
    pub longitude: Radian,
    /// Latitude, in `[−π/2, π/2]`.
    pub latitude: Radian,
    /// True anomaly at the sample time.
    pub true_anomaly: Radian,
    /// Element set with the drifted `Ω` and `ω`.
    pub elements: OrbitalElementSet,
}

/// Longitude and latitude `dt` seconds after the satellite was at true anomaly `theta0`.
///
/// The body-fixed frame coincides with the inertial frame at `dt = 0`.
///
/// Arguments
/// -----------------
/// * `elements` – bound orbit at the epoch.
/// * `theta0` – true anomaly at the epoch.
/// * `dt` – elapsed time (s).
/// * `body` – oblateness and rotation of the central body.
/// * `params` – Newton budget and tolerance for Kepler's equation.
///
/// Return
/// ----------
/// * `Ok(GroundTrackPoint)` – position over the body and the drifted element set.
/// * `Err(OmtError::UnboundOrbit)` – `e ≥ 1`.
/// * `Err(OmtError::IterationLimitReached)` – Kepler's equation did not converge.
pub fn sat_long_lat(
    elements: &OrbitalElementSet,
    theta0: Radian,
    dt: Second,
    body: &OblateBody,
    params: &NewtonParams,
) -> Result<GroundTrackPoint, OmtError> {
    let rates = secular_j2_rates(elements, body)?;
    let e = elements.eccentricity();
    let period = elements.period();

    let ecc0 = true_to_eccentric_anomaly(theta0, e);
    let t = eccentric_to_mean_anomaly(ecc0, e) * period / DPI + dt;
    let mean_anomaly = principal_angle(DPI * t / period);
    let ecc = solve_kepler_eccentric(e, mean_anomaly, params)?;
    let theta = eccentric_to_true_anomaly(ecc, e);

    let drifted = elements.reoriented(
        elements.raan() + rates.raan_rate * dt,
        elements.arg_perigee() + rates.arg_perigee_rate * dt,
        Some(theta),
    );

    let inertial = drifted.state_at_true_anomaly(theta).position;
    let body_fixed = inertial_to_rotating(rotation_angle(body.rotation_rate, dt)) * inertial;
    let (longitude, latitude) = right_ascension_declination(&body_fixed)?;

    debug!("ground track at dt = {dt}: lon = {longitude}, lat = {latitude}, theta = {theta}");
    Ok(GroundTrackPoint {
        longitude,
        latitude,
        true_anomaly: theta,
        elements: drifted,
    })
}

/// Ground track sampled at `k·step` seconds for `k = 0..count`, all from the same epoch.
pub fn ground_track(
    elements: &OrbitalElementSet,
    theta0: Radian,
    step: Second,
    count: usize,
    body: &OblateBody,
    params: &NewtonParams,
) -> Result<Vec<GroundTrackPoint>, OmtError> {
    (0..count)
        .map(|k| sat_long_lat(elements, theta0, k as f64 * step, body, params))
        .collect()
}
