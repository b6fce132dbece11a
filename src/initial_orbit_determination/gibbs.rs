//! # Gibbs method
//!
//! Velocity at the central observation from three position vectors on the same orbit, with
//! no timing information.
//!
//! ```text
//! C₁₂ = r₁ × r₂    C₂₃ = r₂ × r₃    C₃₁ = r₃ × r₁
//! N = r₁·C₂₃ + r₂·C₃₁ + r₃·C₁₂
//! D = C₁₂ + C₂₃ + C₃₁
//! S = (r₂ − r₃)·r₁ + (r₃ − r₁)·r₂ + (r₁ − r₂)·r₃
//! v₂ = √(μ / (N·D)) · (D × r₂ / r₂ + S)
//! ```
//!
//! (scalar `rₖ` are the norms of the position vectors).
//!
//! The three positions must lie in one plane through the attracting center. Collinear
//! observations make `D` and `N` vanish; both are checked before dividing so the failure
//! surfaces as [`OmtError::DegenerateGeometry`] instead of a non-finite velocity.
use log::{debug, warn};
use nalgebra::Vector3;

use crate::constants::{GravParam, DEGENERACY_TOL};
use crate::omt_errors::{check_mu, OmtError};
use crate::orbit_type::{OrbitalElementSet, StateVector};

/// Largest normalized triple product `|r₁·(r₂ × r₃)| / (r₁·r₂·r₃)` accepted as coplanar.
pub const COPLANARITY_TOL: f64 = 1e-4;

/// Velocity at `r2` from three coplanar position observations.
///
/// Arguments
/// -----------------
/// * `r1`, `r2`, `r3` – positions (km) in time order on the same orbit.
/// * `mu` – gravitational parameter (km³/s²).
///
/// Return
/// ----------
/// * `Ok(StateVector)` – position `r2` and the recovered velocity there.
/// * `Err(OmtError::DegenerateGeometry)` – collinear observations (`D` or `N` vanish).
/// * `Err(OmtError::InvalidOrbitalInput)` – invalid `mu`, a zero or non-finite position,
///   or observations that are not coplanar with the origin within [`COPLANARITY_TOL`].
pub fn gibbs(
    r1: &Vector3<f64>,
    r2: &Vector3<f64>,
    r3: &Vector3<f64>,
    mu: GravParam,
) -> Result<StateVector, OmtError> {
    check_mu(mu)?;
    let (r1n, r2n, r3n) = (r1.norm(), r2.norm(), r3.norm());
    for norm in [r1n, r2n, r3n] {
        if !(norm.is_finite() && norm > 0.0) {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "Gibbs observation with norm {norm}"
            )));
        }
    }

    let c12 = r1.cross(r2);
    let c23 = r2.cross(r3);
    let c31 = r3.cross(r1);

    let d = c12 + c23 + c31;
    let n = r1n * c23 + r2n * c31 + r3n * c12;
    let scale = r1n.max(r2n).max(r3n);
    let (d_norm, n_norm) = (d.norm(), n.norm());

    if d_norm <= DEGENERACY_TOL * scale * scale || n_norm <= DEGENERACY_TOL * scale.powi(3) {
        warn!("Gibbs: collinear observations (|D| = {d_norm:e}, |N| = {n_norm:e})");
        return Err(OmtError::DegenerateGeometry(format!(
            "Gibbs observations are collinear (|D| = {d_norm:e}, |N| = {n_norm:e})"
        )));
    }

    let coplanarity = r1.dot(&c23).abs() / (r1n * r2n * r3n);
    if coplanarity > COPLANARITY_TOL {
        warn!("Gibbs: observations off a common plane (triple product {coplanarity:e})");
        return Err(OmtError::InvalidOrbitalInput(format!(
            "Gibbs observations are not coplanar with the origin (normalized triple product {coplanarity:e})"
        )));
    }

    let s = (r2n - r3n) * r1 + (r3n - r1n) * r2 + (r1n - r2n) * r3;
    let v2 = (mu / (n_norm * d_norm)).sqrt() * (d.cross(r2) / r2n + s);

    debug!("Gibbs velocity at r2: {v2:?}");
    Ok(StateVector::new(*r2, v2))
}

impl OrbitalElementSet {
    /// Orbital elements from three coplanar position observations.
    ///
    /// Runs [`gibbs`] and feeds the state at `r2` to
    /// [`OrbitalElementSet::from_state_vectors`]; the true anomaly refers to `r2`.
    pub fn from_gibbs(
        r1: &Vector3<f64>,
        r2: &Vector3<f64>,
        r3: &Vector3<f64>,
        mu: GravParam,
    ) -> Result<Self, OmtError> {
        let state = gibbs(r1, r2, r3, mu)?;
        Self::from_state_vectors(&state, mu)
    }
}
