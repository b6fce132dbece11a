//! Stumpff functions `C(z)` and `S(z)` of the universal-variable formulation.
//!
//! ```text
//! C(z) = (1 − cos √z) / z        S(z) = (√z − sin √z) / (√z)³          z > 0
//! C(z) = (cosh √−z − 1) / (−z)   S(z) = (sinh √−z − √−z) / (√−z)³     z < 0
//! C(0) = 1/2                      S(0) = 1/6
//! ```
//!
//! `z > 0` corresponds to elliptic motion, `z < 0` to hyperbolic motion. The value at
//! `z = 0` is returned exactly; for `0 < |z| < SERIES_BAND` the closed forms lose digits
//! to cancellation in `1 − cos √z` and `√z − sin √z`, so a truncated series is used there.

/// Half-width of the band around zero evaluated with the series expansion.
const SERIES_BAND: f64 = 1e-2;

/// Stumpff function `C(z)`.
pub fn stumpff_c(z: f64) -> f64 {
    if z == 0.0 {
        0.5
    } else if z.abs() < SERIES_BAND {
        // 1/2! − z/4! + z²/6! − z³/8! + z⁴/10!
        0.5 - z / 24.0 + z * z / 720.0 - z.powi(3) / 40_320.0 + z.powi(4) / 3_628_800.0
    } else if z > 0.0 {
        (1.0 - z.sqrt().cos()) / z
    } else {
        ((-z).sqrt().cosh() - 1.0) / (-z)
    }
}

/// Stumpff function `S(z)`.
pub fn stumpff_s(z: f64) -> f64 {
    if z == 0.0 {
        1.0 / 6.0
    } else if z.abs() < SERIES_BAND {
        // 1/3! − z/5! + z²/7! − z³/9! + z⁴/11!
        1.0 / 6.0 - z / 120.0 + z * z / 5040.0 - z.powi(3) / 362_880.0
            + z.powi(4) / 39_916_800.0
    } else if z > 0.0 {
        let sq = z.sqrt();
        (sq - sq.sin()) / sq.powi(3)
    } else {
        let sq = (-z).sqrt();
        (sq.sinh() - sq) / sq.powi(3)
    }
}
