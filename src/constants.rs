//! # Constants and type definitions for omt
//!
//! This module centralizes the **numerical constants**, **physical constants** and
//! **unit type aliases** shared by every part of the toolbox.
//!
//! ## Overview
//!
//! - Newton solver budget and tolerance ([`MAX_ITER`], [`ERR_TOL`])
//! - Angle helpers ([`DPI`], [`RADEG`])
//! - Earth gravitational and oblateness constants
//! - Unit aliases used in signatures (kilometers, seconds, radians)
//!
//! All lengths are expressed in **kilometers**, times in **seconds** and angles in **radians**.

// -------------------------------------------------------------------------------------------------
// Numerical constants
// -------------------------------------------------------------------------------------------------

/// Maximum number of Newton iterations performed by any solver of the toolbox.
pub const MAX_ITER: usize = 1000;

/// Absolute tolerance on the Newton step `f/f'` used to declare convergence.
pub const ERR_TOL: f64 = 1e-8;

/// Geometry threshold for a single state. An eccentricity or a normalized node line below it
/// selects the circular or equatorial angle convention; only a normalized angular momentum
/// below it (rectilinear motion) is an error.
pub const EPS: f64 = 1e-10;

/// Degeneracy threshold between observations. A normalized Gibbs cross product, or the sine
/// or `1 − cos` of a Lambert transfer angle, below it returns
/// [`crate::omt_errors::OmtError::DegenerateGeometry`]. Independent of [`EPS`].
pub const DEGENERACY_TOL: f64 = 1e-10;

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in a solar day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// -------------------------------------------------------------------------------------------------
// Physical constants
// -------------------------------------------------------------------------------------------------

/// Earth gravitational parameter in km³/s²
pub const MU_EARTH: f64 = 398_600.0;

/// Earth equatorial radius in kilometers
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6378.0;

/// Earth second zonal harmonic (oblateness)
pub const EARTH_J2: f64 = 1.08263e-3;

/// Number of solar days in a sidereal year
pub const DAYS_PER_YEAR: f64 = 365.26;

/// Earth sidereal rotation rate in rad/s (one extra turn per year over the solar day)
pub const EARTH_ROTATION_RATE: f64 = DPI * (1.0 + 1.0 / DAYS_PER_YEAR) / SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Velocity in kilometers per second
pub type KmPerSec = f64;
/// Duration in seconds
pub type Second = f64;
/// Gravitational parameter in km³/s²
pub type GravParam = f64;
