//! Civil time and solar-term reference data for four-pillar charts.
//!
//! This crate provides:
//! - Civil birth moments (local date, optional `HH:MM`, fixed UTC offset)
//! - Julian Date conversions and a low-precision apparent solar longitude
//! - The 24 solar terms and an immutable per-year table of their instants
//! - Historical Korean daylight-saving periods

pub mod civil;
pub mod error;
pub mod julian;
pub mod solar_term;
pub mod solar_term_table;
pub mod summer_time;
pub mod sun;

pub use civil::{ClockTime, CivilMoment, KST_OFFSET_MINUTES, parse_date, utc_offset_from_minutes};
pub use error::TimeError;
pub use julian::{J2000_JD, SECONDS_PER_DAY, calendar_to_jd, instant_to_jd, jd_to_instant};
pub use solar_term::{ALL_SOLAR_TERMS, BOUNDARY_TERMS, SolarTerm};
pub use solar_term_table::{
    DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, SolarTermEvent, SolarTermTable, YearTerms, hours_from,
    solar_term_instant,
};
pub use summer_time::{SummerTimePeriod, korean_summer_time_periods, summer_time_period};
pub use sun::{apparent_solar_longitude, normalize_360, normalize_to_pm180};
