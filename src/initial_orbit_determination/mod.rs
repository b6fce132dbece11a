//! # Initial orbit determination
//!
//! Two position-based strategies complement the state-vector descriptor of
//! [`OrbitalElementSet`](crate::orbit_type::OrbitalElementSet):
//!
//! | Method | Inputs | Output |
//! |---|---|---|
//! | [`gibbs`](crate::initial_orbit_determination::gibbs::gibbs) | three coplanar positions | velocity at the middle one |
//! | [`lambert`](crate::initial_orbit_determination::lambert::lambert) | two positions, time of flight, direction | velocities at both ends |
//!
//! Each method also has an element-set entry point
//! ([`OrbitalElementSet::from_gibbs`](crate::orbit_type::OrbitalElementSet::from_gibbs),
//! [`OrbitalElementSet::from_lambert`](crate::orbit_type::OrbitalElementSet::from_lambert))
//! that runs the recovered state through the state-vector descriptor.
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::Vector3;
//! use omt::constants::MU_EARTH;
//! use omt::initial_orbit_determination::lambert::{lambert, TransferDirection};
//! use omt::root_finder::NewtonParams;
//!
//! let r1 = Vector3::new(5000.0, 10_000.0, 2100.0);
//! let r2 = Vector3::new(-14_600.0, 2500.0, 7000.0);
//! let transfer = lambert(
//!     &r1,
//!     &r2,
//!     3600.0,
//!     TransferDirection::Prograde,
//!     MU_EARTH,
//!     &NewtonParams::default(),
//! )
//! .unwrap();
//! assert!((transfer.v1.x + 5.9925).abs() < 1e-3);
//! ```

/// Gibbs method from three position vectors.
pub mod gibbs;

/// Lambert's problem in universal variables.
pub mod lambert;
