//! Julian Date conversions.

use chrono::{DateTime, Utc};

/// Julian Date of J2000.0 (2000-01-01T12:00:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date from a Gregorian calendar date with fractional day (Meeus ch. 7).
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Julian Date of a UTC instant.
pub fn instant_to_jd(instant: &DateTime<Utc>) -> f64 {
    let secs = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// UTC instant of a Julian Date, rounded to the nearest whole second.
///
/// Returns `None` outside chrono's representable range.
pub fn jd_to_instant(jd: f64) -> Option<DateTime<Utc>> {
    let secs = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY).round();
    DateTime::from_timestamp(secs as i64, 0)
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}
