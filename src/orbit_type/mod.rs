//! # Orbit representations
//!
//! - [`state_vector`](crate::orbit_type::state_vector) – position/velocity pair, the transient
//!   value consumed and produced by propagation and determination.
//! - [`element_set`](crate::orbit_type::element_set) – classical orbital elements together with
//!   their secondary parameters, the value every orbit-determination entry point returns.
//!
//! ## Typical workflow
//!
//! ```rust
//! use nalgebra::Vector3;
//! use omt::constants::MU_EARTH;
//! use omt::orbit_type::{OrbitalElementSet, StateVector};
//!
//! let state = StateVector::new(
//!     Vector3::new(-6045.0, -3490.0, 2500.0),
//!     Vector3::new(-3.457, 6.618, 2.533),
//! );
//! let elements = OrbitalElementSet::from_state_vectors(&state, MU_EARTH).unwrap();
//! assert!(elements.is_bound());
//! println!("{elements}");
//! ```

/// Cartesian position/velocity pair.
pub mod state_vector;

/// Classical orbital element set and its constructors.
pub mod element_set;

pub use element_set::OrbitalElementSet;
pub use state_vector::StateVector;
