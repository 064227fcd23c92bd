//! Low-precision apparent solar longitude.
//!
//! Meeus, *Astronomical Algorithms* ch. 25 (geometric longitude from the
//! equation of centre, corrected for nutation and aberration). Accuracy is
//! about 0.01 deg, i.e. roughly a quarter of an hour in solar-term timing.
//! UT is used in place of TT; ΔT stays under two minutes across 1900-2100.

use crate::julian::jd_to_centuries;

/// Mean daily motion of the Sun in degrees.
pub const SUN_MEAN_MOTION_DEG_PER_DAY: f64 = 360.0 / 365.242_19;

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360).
pub fn apparent_solar_longitude(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let t2 = t * t;

    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t2).to_radians();

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_lon = l0 + c;
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_360(true_lon - 0.005_69 - 0.004_78 * omega.sin())
}
