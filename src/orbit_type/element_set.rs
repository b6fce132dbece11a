//! # Classical orbital element set
//!
//! [`OrbitalElementSet`] is the value produced by every orbit-determination entry point:
//!
//! | Constructor | Inputs |
//! |---|---|
//! | [`OrbitalElementSet::from_state_vectors`] | position and velocity |
//! | [`OrbitalElementSet::from_classical`] | `h, e, i, Ω, ω` |
//! | [`OrbitalElementSet::from_apogee_perigee`] | `r_p, r_a, i, Ω, ω` |
//! | [`OrbitalElementSet::from_gibbs`](crate::initial_orbit_determination::gibbs) | three positions |
//! | [`OrbitalElementSet::from_lambert`](crate::initial_orbit_determination::lambert) | two positions and a time of flight |
//!
//! The set is immutable. The secondary parameters (`a`, `r_p`, `r_a`, period, `α`) are
//! computed once, inside the single private constructor every entry point goes through, so
//! they always match the primary elements. Fields are private for the same reason.
//!
//! Secondary parameters
//! -----------------
//! ```text
//! r_p = h² / (μ(1+e))
//! r_a = h² / (μ(1−e))          (∞ for e ≥ 1)
//! a   = (r_p + r_a) / 2        (h² / (μ(1−e²)) for e ≥ 1, negative on hyperbolas)
//! T   = 2π·a^1.5 / √μ          (∞ for e ≥ 1)
//! α   = 1 / a
//! ```
//!
//! Angle conventions
//! -----------------
//! * Equatorial orbits (`|N|/h < EPS`) have no node line: `Ω = 0`.
//! * Circular orbits (`e < EPS`) have no perigee: `ω = 0`.
//! * On equatorial non-circular orbits `ω` is measured from the x-axis, in the direction
//!   of motion.
use std::fmt;

use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::constants::{GravParam, Kilometer, Radian, Second, DPI, EPS, RADEG};
use crate::conversion::{principal_angle, resolve_quadrant};
use crate::omt_errors::{check_mu, OmtError};
use crate::orbit_type::state_vector::StateVector;
use crate::ref_system::perifocal_to_geocentric;

/// Classical orbital elements and the secondary parameters derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitalElementSet {
    mu: GravParam,
    angular_momentum_vector: Vector3<f64>,
    angular_momentum: f64,
    eccentricity_vector: Vector3<f64>,
    eccentricity: f64,
    inclination: Radian,
    raan: Radian,
    arg_perigee: Radian,
    true_anomaly: Option<Radian>,
    semi_major_axis: Kilometer,
    perigee_radius: Kilometer,
    apogee_radius: Kilometer,
    period: Second,
    alpha: f64,
}

impl OrbitalElementSet {
    #[allow(clippy::too_many_arguments)]
    fn assemble(
        mu: GravParam,
        angular_momentum_vector: Vector3<f64>,
        h: f64,
        eccentricity_vector: Vector3<f64>,
        e: f64,
        inclination: Radian,
        raan: Radian,
        arg_perigee: Radian,
        true_anomaly: Option<Radian>,
    ) -> Self {
        let p = h * h / mu;

        let perigee_radius = p / (1.0 + e);
        let (apogee_radius, semi_major_axis, period) = if e < 1.0 {
            let apogee_radius = p / (1.0 - e);
            let a = 0.5 * (perigee_radius + apogee_radius);
            (apogee_radius, a, DPI * a.powf(1.5) / mu.sqrt())
        } else if e == 1.0 {
            (f64::INFINITY, f64::INFINITY, f64::INFINITY)
        } else {
            (f64::INFINITY, p / (1.0 - e * e), f64::INFINITY)
        };

        OrbitalElementSet {
            mu,
            angular_momentum_vector,
            angular_momentum: h,
            eccentricity_vector,
            eccentricity: e,
            inclination,
            raan,
            arg_perigee,
            true_anomaly,
            semi_major_axis,
            perigee_radius,
            apogee_radius,
            period,
            alpha: 1.0 / semi_major_axis,
        }
    }

    /// Orbital elements from a position/velocity pair.
    ///
    /// ```text
    /// h = r × v               i = acos(h_z / h)
    /// N = ẑ × h               Ω = acos(N_x / |N|)        resolved with N_y
    /// e = ((v² − μ/r)·r − r·v_r·v) / μ
    /// ω = acos(N·e / (|N|·e))  resolved with e_z
    /// θ = acos(e·r / (e·r))    resolved with v_r
    /// ```
    ///
    /// The true anomaly is returned in [`true_anomaly`](Self::true_anomaly). On circular
    /// orbits it is measured from the node line (argument of latitude), and on circular
    /// equatorial orbits from the x-axis (true longitude). This extraction has no
    /// counterpart in the element-based constructors; validate it against a reference
    /// implementation before relying on it for near-circular or near-equatorial orbits.
    ///
    /// Return
    /// ----------
    /// * `Err(OmtError::InvalidOrbitalInput)` – invalid `mu`, a position at the origin or
    ///   non-finite components.
    /// * `Err(OmtError::DegenerateGeometry)` – rectilinear motion (`r × v = 0`).
    pub fn from_state_vectors(state: &StateVector, mu: GravParam) -> Result<Self, OmtError> {
        check_mu(mu)?;
        let r = state.radius();
        if r <= 0.0 || !state.is_finite() {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "cannot derive elements from state {state}"
            )));
        }
        let pos = &state.position;
        let vel = &state.velocity;
        let vr = state.radial_velocity();

        let h_vec = state.angular_momentum();
        let h = h_vec.norm();
        if h <= EPS * r * state.speed() {
            return Err(OmtError::DegenerateGeometry(format!(
                "zero angular momentum for state {state}"
            )));
        }
        let inclination = (h_vec.z / h).clamp(-1.0, 1.0).acos();
        // sense of motion, used where the node line is undefined
        let turn = if h_vec.z < 0.0 { -1.0 } else { 1.0 };

        let node = Vector3::new(-h_vec.y, h_vec.x, 0.0);
        let n = node.norm();
        let equatorial = n / h < EPS;
        let raan = if equatorial {
            0.0
        } else {
            resolve_quadrant(node.x / n, node.y)
        };

        let e_vec = ((vel.norm_squared() - mu / r) * pos - r * vr * vel) / mu;
        let e = e_vec.norm();
        let circular = e < EPS;

        let arg_perigee = if circular {
            0.0
        } else if equatorial {
            resolve_quadrant(e_vec.x / e, e_vec.y * turn)
        } else {
            resolve_quadrant(node.dot(&e_vec) / (n * e), e_vec.z)
        };

        let true_anomaly = if !circular {
            resolve_quadrant(e_vec.dot(pos) / (e * r), vr)
        } else if !equatorial {
            resolve_quadrant(node.dot(pos) / (n * r), pos.z)
        } else {
            resolve_quadrant(pos.x / r, pos.y * turn)
        };

        debug!("elements from state vectors: h = {h}, e = {e}, i = {inclination}");
        Ok(Self::assemble(
            mu,
            h_vec,
            h,
            e_vec,
            e,
            inclination,
            raan,
            arg_perigee,
            Some(true_anomaly),
        ))
    }

    /// Orbital elements from `(h, e, i, Ω, ω)`.
    ///
    /// The angular momentum and eccentricity vectors are rebuilt from the elements through
    /// the perifocal rotation. Ω and ω are reduced to `[0, 2π)`. The true anomaly is unknown
    /// and left unset.
    ///
    /// Return
    /// ----------
    /// * `Err(OmtError::InvalidOrbitalInput)` – invalid `mu`, `h ≤ 0`, `e < 0`,
    ///   `i ∉ [0, π]` or a non-finite angle.
    pub fn from_classical(
        h: f64,
        e: f64,
        inclination: Radian,
        raan: Radian,
        arg_perigee: Radian,
        mu: GravParam,
    ) -> Result<Self, OmtError> {
        check_mu(mu)?;
        if !(h.is_finite() && h > 0.0) {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "angular momentum must be positive, got {h}"
            )));
        }
        if !(e.is_finite() && e >= 0.0) {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "eccentricity must be non-negative, got {e}"
            )));
        }
        if !(0.0..=std::f64::consts::PI).contains(&inclination) {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "inclination must lie in [0, π], got {inclination}"
            )));
        }
        if !(raan.is_finite() && arg_perigee.is_finite()) {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "non-finite orientation angles Ω = {raan}, ω = {arg_perigee}"
            )));
        }

        let raan = principal_angle(raan);
        let arg_perigee = principal_angle(arg_perigee);
        let q = perifocal_to_geocentric(raan, arg_perigee, inclination);
        Ok(Self::assemble(
            mu,
            h * q.column(2),
            h,
            e * q.column(0),
            e,
            inclination,
            raan,
            arg_perigee,
            None,
        ))
    }

    /// Orbital elements from perigee and apogee radii plus orientation.
    ///
    /// ```text
    /// e = (r_a − r_p) / (r_a + r_p)
    /// h = √(μ·r_p·(1 + e))
    /// ```
    ///
    /// Return
    /// ----------
    /// * `Err(OmtError::InvalidOrbitalInput)` – unless `0 < r_p ≤ r_a < ∞`, plus every
    ///   failure of [`from_classical`](Self::from_classical).
    pub fn from_apogee_perigee(
        perigee_radius: Kilometer,
        apogee_radius: Kilometer,
        inclination: Radian,
        raan: Radian,
        arg_perigee: Radian,
        mu: GravParam,
    ) -> Result<Self, OmtError> {
        check_mu(mu)?;
        if !(perigee_radius > 0.0 && perigee_radius <= apogee_radius && apogee_radius.is_finite())
        {
            return Err(OmtError::InvalidOrbitalInput(format!(
                "expected 0 < r_p <= r_a, got r_p = {perigee_radius}, r_a = {apogee_radius}"
            )));
        }
        let e = (apogee_radius - perigee_radius) / (apogee_radius + perigee_radius);
        let h = (mu * perigee_radius * (1.0 + e)).sqrt();
        Self::from_classical(h, e, inclination, raan, arg_perigee, mu)
    }

    /// Same orbit shape and plane inclination with a new orientation and true anomaly.
    pub(crate) fn reoriented(
        &self,
        raan: Radian,
        arg_perigee: Radian,
        true_anomaly: Option<Radian>,
    ) -> Self {
        let raan = principal_angle(raan);
        let arg_perigee = principal_angle(arg_perigee);
        let q = perifocal_to_geocentric(raan, arg_perigee, self.inclination);
        Self::assemble(
            self.mu,
            self.angular_momentum * q.column(2),
            self.angular_momentum,
            self.eccentricity * q.column(0),
            self.eccentricity,
            self.inclination,
            raan,
            arg_perigee,
            true_anomaly,
        )
    }

    /// Rotation matrix from this orbit's perifocal frame to the geocentric equatorial frame.
    pub fn perifocal_to_geocentric(&self) -> Matrix3<f64> {
        perifocal_to_geocentric(self.raan, self.arg_perigee, self.inclination)
    }

    /// Express a perifocal vector in the geocentric equatorial frame.
    pub fn to_geocentric(&self, perifocal: &Vector3<f64>) -> Vector3<f64> {
        self.perifocal_to_geocentric() * perifocal
    }

    /// Position and velocity on this orbit at true anomaly `θ`.
    ///
    /// ```text
    /// r_pf = h²/μ / (1 + e·cos θ) · [cos θ, sin θ, 0]
    /// v_pf = μ/h · [−sin θ, e + cos θ, 0]
    /// ```
    ///
    /// Both vectors are rotated into the geocentric equatorial frame.
    pub fn state_at_true_anomaly(&self, theta: Radian) -> StateVector {
        let (h, e, mu) = (self.angular_momentum, self.eccentricity, self.mu);
        let (sin_t, cos_t) = theta.sin_cos();
        let r_pf = h * h / mu / (1.0 + e * cos_t) * Vector3::new(cos_t, sin_t, 0.0);
        let v_pf = mu / h * Vector3::new(-sin_t, e + cos_t, 0.0);
        let q = self.perifocal_to_geocentric();
        StateVector::new(q * r_pf, q * v_pf)
    }

    /// Gravitational parameter μ (km³/s²).
    pub fn mu(&self) -> GravParam {
        self.mu
    }

    /// Specific angular momentum magnitude `h` (km²/s).
    pub fn angular_momentum(&self) -> f64 {
        self.angular_momentum
    }

    pub fn angular_momentum_vector(&self) -> &Vector3<f64> {
        &self.angular_momentum_vector
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn eccentricity_vector(&self) -> &Vector3<f64> {
        &self.eccentricity_vector
    }

    pub fn inclination(&self) -> Radian {
        self.inclination
    }

    /// Right ascension of the ascending node Ω.
    pub fn raan(&self) -> Radian {
        self.raan
    }

    /// Argument of perigee ω.
    pub fn arg_perigee(&self) -> Radian {
        self.arg_perigee
    }

    /// True anomaly at the determination epoch, when the constructor knows it.
    pub fn true_anomaly(&self) -> Option<Radian> {
        self.true_anomaly
    }

    pub fn semi_major_axis(&self) -> Kilometer {
        self.semi_major_axis
    }

    pub fn perigee_radius(&self) -> Kilometer {
        self.perigee_radius
    }

    pub fn apogee_radius(&self) -> Kilometer {
        self.apogee_radius
    }

    pub fn period(&self) -> Second {
        self.period
    }

    /// Reciprocal semi-major axis `α = 1/a` (1/km).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Mean motion `n = 2π/T` (rad/s), zero on unbound orbits.
    pub fn mean_motion(&self) -> f64 {
        DPI / self.period
    }

    /// True for elliptic and circular orbits.
    pub fn is_bound(&self) -> bool {
        self.eccentricity < 1.0
    }
}

impl fmt::Display for OrbitalElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbital Elements (mu = {} km^3/s^2)", self.mu)?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  h   (angular momentum)      = {:.6} km^2/s",
            self.angular_momentum
        )?;
        writeln!(f, "  e   (eccentricity)          = {:.6}", self.eccentricity)?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination / RADEG
        )?;
        writeln!(
            f,
            "  Ω   (ascending node)        = {:.6} rad ({:.6}°)",
            self.raan,
            self.raan / RADEG
        )?;
        writeln!(
            f,
            "  ω   (argument of perigee)   = {:.6} rad ({:.6}°)",
            self.arg_perigee,
            self.arg_perigee / RADEG
        )?;
        match self.true_anomaly {
            Some(theta) => writeln!(
                f,
                "  θ   (true anomaly)          = {:.6} rad ({:.6}°)",
                theta,
                theta / RADEG
            )?,
            None => writeln!(f, "  θ   (true anomaly)          = unknown")?,
        }
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} km",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  r_p (perigee radius)        = {:.6} km",
            self.perigee_radius
        )?;
        writeln!(
            f,
            "  r_a (apogee radius)         = {:.6} km",
            self.apogee_radius
        )?;
        write!(f, "  T   (period)                = {:.6} s", self.period)
    }
}
