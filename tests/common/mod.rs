#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use omt::constants::MU_EARTH;
use omt::orbit_type::{OrbitalElementSet, StateVector};

pub fn assert_state_close(actual: &StateVector, expected: &StateVector, pos_eps: f64, vel_eps: f64) {
    assert_abs_diff_eq!(actual.position, expected.position, epsilon = pos_eps);
    assert_abs_diff_eq!(actual.velocity, expected.velocity, epsilon = vel_eps);
}

pub fn assert_orientation_close(
    actual: &OrbitalElementSet,
    expected: &OrbitalElementSet,
    epsilon: f64,
) {
    assert_abs_diff_eq!(actual.inclination(), expected.inclination(), epsilon = epsilon);
    assert_abs_diff_eq!(actual.raan(), expected.raan(), epsilon = epsilon);
    assert_abs_diff_eq!(actual.arg_perigee(), expected.arg_perigee(), epsilon = epsilon);
    assert_abs_diff_eq!(actual.eccentricity(), expected.eccentricity(), epsilon = epsilon);
}

/// State on a circular orbit of the given radius, inclined about the x-axis.
pub fn circular_state(radius: f64, inclination: f64, arg_latitude: f64) -> StateVector {
    let vc = (MU_EARTH / radius).sqrt();
    let (si, ci) = inclination.sin_cos();
    let (su, cu) = arg_latitude.sin_cos();
    StateVector::new(
        radius * Vector3::new(cu, su * ci, su * si),
        vc * Vector3::new(-su, cu * ci, cu * si),
    )
}

/// Mean motion of a circular orbit.
pub fn circular_mean_motion(radius: f64) -> f64 {
    (MU_EARTH / radius.powi(3)).sqrt()
}
