//! # omt: orbital mechanics toolbox
//!
//! Two-body orbit determination, propagation and frame transforms:
//!
//! * Newton root finding ([`root_finder`]) and the Stumpff functions ([`stumpff`]),
//! * classical and universal Kepler solvers ([`kepler`]),
//! * universal-variable state propagation ([`state_transition`]),
//! * orbital elements from state vectors, element sets, apogee/perigee radii
//!   ([`orbit_type`]), three positions (Gibbs) or two positions and a time of flight
//!   (Lambert) ([`initial_orbit_determination`]),
//! * perifocal, geocentric and body-fixed frames ([`ref_system`]) and J2 ground tracks
//!   ([`ground_track`]),
//! * LVLH relative motion ([`relative_motion`]), J2 perturbing acceleration and plane-change
//!   impulses ([`perturbations`]).
//!
//! Every computation is a synchronous call on plain values; element sets are immutable and
//! each determination entry point returns a fresh one. Lengths are in kilometers, times in
//! seconds and angles in radians.
pub mod constants;
pub mod conversion;
pub mod ground_track;
pub mod initial_orbit_determination;
pub mod kepler;
pub mod omt_errors;
pub mod orbit_type;
pub mod perturbations;
pub mod ref_system;
pub mod relative_motion;
pub mod root_finder;
pub mod state_transition;
pub mod stumpff;

pub use omt_errors::OmtError;
pub use orbit_type::{OrbitalElementSet, StateVector};
pub use root_finder::NewtonParams;
