mod common;

use approx::assert_abs_diff_eq;
use omt::constants::{DPI, MU_EARTH, RADEG};
use omt::conversion::{
    eccentric_to_mean_anomaly, eccentric_to_true_anomaly, true_to_eccentric_anomaly,
};
use omt::kepler::solve_kepler_eccentric;
use omt::orbit_type::OrbitalElementSet;
use omt::root_finder::NewtonParams;
use omt::state_transition::propagate;
use omt::OmtError;

use crate::common::{assert_state_close, circular_mean_motion, circular_state};

#[test]
fn test_circular_orbit_returns_after_one_period() {
    let radius = 7000.0;
    let state = circular_state(radius, 0.0, 0.0);
    let period = DPI / circular_mean_motion(radius);
    let back = propagate(&state, period, MU_EARTH, &NewtonParams::default()).unwrap();
    assert_state_close(&back, &state, 1e-6, 1e-9);
}

#[test]
fn test_universal_propagation_matches_kepler_equation() {
    let params = NewtonParams::default();
    let elements = OrbitalElementSet::from_apogee_perigee(
        6700.0,
        12_000.0,
        35.0 * RADEG,
        80.0 * RADEG,
        120.0 * RADEG,
        MU_EARTH,
    )
    .unwrap();
    let e = elements.eccentricity();
    let theta0 = 0.4;
    let initial = elements.state_at_true_anomaly(theta0);
    let mean0 = eccentric_to_mean_anomaly(true_to_eccentric_anomaly(theta0, e), e);

    for dt in [600.0, 2500.0, 7000.0] {
        let mean = (mean0 + elements.mean_motion() * dt).rem_euclid(DPI);
        let ecc = solve_kepler_eccentric(e, mean, &params).unwrap();
        let expected = elements.state_at_true_anomaly(eccentric_to_true_anomaly(ecc, e));

        let propagated = propagate(&initial, dt, MU_EARTH, &params).unwrap();
        assert_state_close(&propagated, &expected, 1e-3, 1e-6);
    }
}

#[test]
fn test_propagation_is_reversible() {
    let params = NewtonParams::default();
    let state = circular_state(9000.0, 1.1, 0.2);
    let fwd = propagate(&state, 12_345.0, MU_EARTH, &params).unwrap();
    let back = propagate(&fwd, -12_345.0, MU_EARTH, &params).unwrap();
    assert_state_close(&back, &state, 1e-6, 1e-9);
    assert_abs_diff_eq!(fwd.radius(), 9000.0, epsilon = 1e-6);
}

#[test]
fn test_classical_solver_rejects_unbound_eccentricity() {
    let params = NewtonParams::default();
    for (e, mean) in [(1.0, 0.3), (1.5, 1.0), (2.0, 3.0), (f64::INFINITY, 1.0)] {
        let err = solve_kepler_eccentric(e, mean, &params).unwrap_err();
        assert!(matches!(
            err,
            OmtError::IterationLimitReached { iterations: 0, .. }
        ));
    }
}
