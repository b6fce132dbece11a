//! # Reference frames
//!
//! Three frames are involved in the toolbox:
//!
//! 1. **Perifocal** – origin at the attracting center, x toward perigee, z along the
//!    angular momentum.
//! 2. **Geocentric equatorial** – inertial, x toward the vernal equinox, z toward the pole.
//! 3. **Body-fixed rotating** – geocentric equatorial rotated about the polar axis by the
//!    body's rotation angle.
//!
//! This module builds the rotation matrices between them and extracts right ascension
//! and declination from a geocentric vector.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, Second, EPS};
use crate::conversion::resolve_quadrant;
use crate::omt_errors::OmtError;

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix is an **active rotation** of a vector by `alpha` in the direct
/// (counter-clockwise) sense, so that the rotated vector is `x' = R · x`.
/// A change of basis by the same angle is `rotmt(-alpha, axis)`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation matrix from the perifocal frame to the geocentric equatorial frame.
///
/// Built from the 3-1-3 Euler sequence `R_z(Ω) · R_x(i) · R_z(ω)`:
///
/// ```text
/// | −sΩ·ci·sω + cΩ·cω   −sΩ·ci·cω − cΩ·sω    sΩ·si |
/// |  cΩ·ci·sω + sΩ·cω    cΩ·ci·cω − sΩ·sω   −cΩ·si |
/// |  si·sω               si·cω                ci   |
/// ```
///
/// Arguments
/// -----------------
/// * `raan` – right ascension of the ascending node Ω.
/// * `arg_perigee` – argument of perigee ω.
/// * `inclination` – inclination i.
pub fn perifocal_to_geocentric(raan: Radian, arg_perigee: Radian, inclination: Radian) -> Matrix3<f64> {
    rotmt(raan, Axis::Z) * rotmt(inclination, Axis::X) * rotmt(arg_perigee, Axis::Z)
}

/// Rotation from the inertial geocentric equatorial frame to a frame rotated by `angle`
/// about the polar axis (change of basis, not an active rotation).
pub fn inertial_to_rotating(angle: Radian) -> Matrix3<f64> {
    rotmt(-angle, Axis::Z)
}

/// Rotation angle of a body spinning at `rotation_rate` (rad/s) after `dt` seconds.
pub fn rotation_angle(rotation_rate: f64, dt: Second) -> Radian {
    rotation_rate * dt
}

/// Right ascension and declination of a geocentric vector.
///
/// ```text
/// (l, m, n) = r / |r|
/// δ = asin(n)
/// α = acos(l / cos δ)       resolved with the sign of m
/// ```
///
/// Return
/// ----------
/// * `Ok((α, δ))` with `α ∈ [0, 2π)` and `δ ∈ [−π/2, π/2]`. Along the polar axis the
///   right ascension is undefined and reported as `0`.
/// * `Err(OmtError::DegenerateGeometry)` for the zero vector.
pub fn right_ascension_declination(r: &Vector3<f64>) -> Result<(Radian, Radian), OmtError> {
    let norm = r.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(OmtError::DegenerateGeometry(format!(
            "right ascension of a vector of norm {norm}"
        )));
    }
    let l = r.x / norm;
    let m = r.y / norm;
    let n = r.z / norm;

    let declination = n.clamp(-1.0, 1.0).asin();
    let cos_dec = declination.cos();
    let right_ascension = if cos_dec < EPS {
        0.0
    } else {
        resolve_quadrant(l / cos_dec, m)
    };

    Ok((right_ascension, declination))
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use crate::constants::RADEG;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotmt_is_active() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(
            rotmt(FRAC_PI_2, Axis::Z) * x,
            Vector3::new(0.0, 1.0, 0.0),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            rotmt(FRAC_PI_2, Axis::Y) * x,
            Vector3::new(0.0, 0.0, -1.0),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            rotmt(FRAC_PI_2, Axis::X) * Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_perifocal_matrix_matches_closed_form() {
        let (raan, argp, inc) = (255.3 * RADEG, 20.07 * RADEG, 153.2 * RADEG);
        let (so, co) = raan.sin_cos();
        let (sw, cw) = argp.sin_cos();
        let (si, ci) = inc.sin_cos();
        let expected = Matrix3::new(
            -so * ci * sw + co * cw,
            -so * ci * cw - co * sw,
            so * si,
            co * ci * sw + so * cw,
            co * ci * cw - so * sw,
            -co * si,
            si * sw,
            si * cw,
            ci,
        );
        let q = perifocal_to_geocentric(raan, argp, inc);
        assert_abs_diff_eq!(q, expected, epsilon = 1e-14);
        assert_abs_diff_eq!(q * q.transpose(), Matrix3::identity(), epsilon = 1e-14);
        assert_abs_diff_eq!(q.determinant(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_inertial_to_rotating() {
        // after a quarter turn the inertial y-axis lies along the rotating x-axis
        let rot = inertial_to_rotating(FRAC_PI_2);
        assert_abs_diff_eq!(
            rot * Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(rotation_angle(2.0, 3.0), 6.0);
    }

    #[test]
    fn test_right_ascension_declination() {
        let (ra, dec) = right_ascension_declination(&Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(ra, PI / 4.0, epsilon = 1e-15);
        assert_abs_diff_eq!(dec, 0.0, epsilon = 1e-15);

        let (ra, dec) = right_ascension_declination(&Vector3::new(1.0, -1.0, 2f64.sqrt())).unwrap();
        assert_abs_diff_eq!(ra, 7.0 * PI / 4.0, epsilon = 1e-14);
        assert_abs_diff_eq!(dec, PI / 4.0, epsilon = 1e-14);

        let (ra, dec) = right_ascension_declination(&Vector3::new(0.0, 0.0, -5.0)).unwrap();
        assert_eq!(ra, 0.0);
        assert_abs_diff_eq!(dec, -FRAC_PI_2, epsilon = 1e-15);

        assert!(right_ascension_declination(&Vector3::zeros())
            .unwrap_err()
            .is_degenerate());
    }

    #[test]
    fn test_right_ascension_on_negative_x_axis() {
        // m = 0 keeps the principal value: α = π, never 2π − π evaluated on the other branch
        let (ra, _) = right_ascension_declination(&Vector3::new(-3.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(ra, PI, epsilon = 1e-15);
    }
}
