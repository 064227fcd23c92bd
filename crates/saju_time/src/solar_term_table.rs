//! Dated lookup of solar-term instants per calendar year.
//!
//! A table is either computed from the solar longitude (coarse bracket plus
//! bisection, the same root-finding the sankranti search uses) or loaded from
//! an official almanac file. Tables are immutable once built.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, instant_to_jd, jd_to_instant};
use crate::solar_term::{ALL_SOLAR_TERMS, SolarTerm};
use crate::sun::{SUN_MEAN_MOTION_DEG_PER_DAY, apparent_solar_longitude, normalize_360, normalize_to_pm180};

/// Approximate apparent solar longitude at 00:00 UTC on January 1.
const JAN1_SOLAR_LONGITUDE_DEG: f64 = 280.0;

/// Half-width of the bisection bracket around the first guess, in days.
const BRACKET_HALF_WIDTH_DAYS: f64 = 8.0;

/// Maximum bisection iterations.
const MAX_ITERATIONS: u32 = 60;

/// Bisection convergence threshold in days (~1 ms).
const CONVERGENCE_DAYS: f64 = 1e-8;

/// Default first year of the built-in computed table.
pub const DEFAULT_FIRST_YEAR: i32 = 1900;

/// Default last year of the built-in computed table.
pub const DEFAULT_LAST_YEAR: i32 = 2100;

/// Solar-term instants of a single calendar year.
pub type YearTerms = BTreeMap<SolarTerm, DateTime<Utc>>;

/// A solar term resolved to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolarTermEvent {
    /// Instant the term begins.
    pub instant: DateTime<Utc>,
    /// Which term.
    pub term: SolarTerm,
}

/// Immutable per-year table of solar-term instants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarTermTable {
    years: BTreeMap<i32, YearTerms>,
}

impl SolarTermTable {
    /// An empty table. Every lookup reports missing data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compute all 24 terms for every year in `years`.
    pub fn computed(years: RangeInclusive<i32>) -> Self {
        debug!(first = *years.start(), last = *years.end(), "computing solar-term table");
        let years = years
            .map(|year| {
                let terms = ALL_SOLAR_TERMS
                    .iter()
                    .filter_map(|&term| solar_term_instant(year, term).map(|t| (term, t)))
                    .collect();
                (year, terms)
            })
            .collect();
        Self { years }
    }

    /// Build a table from explicit per-year data.
    pub fn from_years(years: BTreeMap<i32, YearTerms>) -> Self {
        Self { years }
    }

    /// Parse almanac JSON: `{ "2024": { "입춘": "2024-02-04T17:27:00+09:00", ... } }`.
    ///
    /// Term keys may be Korean, hanja, English or kebab-case ids; instants must be RFC 3339.
    pub fn from_json(content: &str) -> Result<Self, TimeError> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(content)?;
        let mut years = BTreeMap::new();
        for (year_key, entries) in raw {
            let year: i32 = year_key
                .trim()
                .parse()
                .map_err(|_| TimeError::SolarTermParse(format!("invalid year key: {year_key}")))?;
            let mut terms = YearTerms::new();
            for (name, stamp) in entries {
                let term: SolarTerm = name.parse()?;
                let instant = DateTime::parse_from_rfc3339(stamp.trim())
                    .map_err(|e| TimeError::SolarTermParse(format!("{year} {name}: {e}")))?
                    .with_timezone(&Utc);
                terms.insert(term, instant);
            }
            years.insert(year, terms);
        }
        Ok(Self { years })
    }

    /// Load almanac JSON from a file.
    pub fn load(path: &Path) -> Result<Self, TimeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to the almanac JSON layout accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, TimeError> {
        let raw: BTreeMap<String, BTreeMap<&str, String>> = self
            .years
            .iter()
            .map(|(year, terms)| {
                let entries = terms
                    .iter()
                    .map(|(term, t)| (term.korean(), t.to_rfc3339()))
                    .collect();
                (year.to_string(), entries)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// A copy of `self` where every year present in `overrides` is replaced wholesale.
    pub fn merged(&self, overrides: &SolarTermTable) -> Self {
        let mut years = self.years.clone();
        for (year, terms) in &overrides.years {
            years.insert(*year, terms.clone());
        }
        Self { years }
    }

    /// Terms recorded for `year`, if the year is covered.
    pub fn year(&self, year: i32) -> Option<&YearTerms> {
        self.years.get(&year).filter(|terms| !terms.is_empty())
    }

    /// Whether any data exists for `year`.
    pub fn covers(&self, year: i32) -> bool {
        self.year(year).is_some()
    }

    /// Instant of one term in one year.
    pub fn instant(&self, year: i32, term: SolarTerm) -> Option<DateTime<Utc>> {
        self.year(year).and_then(|terms| terms.get(&term).copied())
    }

    /// Covered years, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// All recorded terms of the given years, sorted by instant.
    pub fn events_in(&self, years: RangeInclusive<i32>) -> Vec<SolarTermEvent> {
        let mut events: Vec<SolarTermEvent> = years
            .filter_map(|y| self.year(y))
            .flat_map(|terms| {
                terms
                    .iter()
                    .map(|(&term, &instant)| SolarTermEvent { instant, term })
            })
            .collect();
        events.sort();
        events
    }

    /// Boundary (month-opening) terms of the given years, sorted by instant.
    pub fn boundary_events_in(&self, years: RangeInclusive<i32>) -> Vec<SolarTermEvent> {
        self.events_in(years)
            .into_iter()
            .filter(|e| e.term.is_boundary())
            .collect()
    }

    /// The recorded term closest to `instant` among the given years.
    pub fn nearest_event(
        &self,
        instant: &DateTime<Utc>,
        years: RangeInclusive<i32>,
    ) -> Option<SolarTermEvent> {
        self.events_in(years)
            .into_iter()
            .min_by_key(|e| (e.instant - *instant).num_seconds().abs())
    }

    /// The month-opening term closest to `instant` among the given years.
    pub fn nearest_boundary_event(
        &self,
        instant: &DateTime<Utc>,
        years: RangeInclusive<i32>,
    ) -> Option<SolarTermEvent> {
        self.boundary_events_in(years)
            .into_iter()
            .min_by_key(|e| (e.instant - *instant).num_seconds().abs())
    }

    /// Month-opening terms in `[start, end)` among the given years.
    pub fn boundary_events_between(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        years: RangeInclusive<i32>,
    ) -> Vec<SolarTermEvent> {
        self.boundary_events_in(years)
            .into_iter()
            .filter(|e| e.instant >= *start && e.instant < *end)
            .collect()
    }
}

/// Instant the Sun reaches `term`'s longitude during calendar `year`,
/// rounded to the nearest minute.
///
/// Returns `None` only if the bracket fails to straddle the crossing, which
/// does not happen for dates chrono can represent.
pub fn solar_term_instant(year: i32, term: SolarTerm) -> Option<DateTime<Utc>> {
    let target = term.longitude_deg();
    let jan1 = calendar_to_jd(year, 1, 1.0);
    let ahead = normalize_360(target - JAN1_SOLAR_LONGITUDE_DEG);
    let guess = jan1 + ahead / SUN_MEAN_MOTION_DEG_PER_DAY;

    let f = |jd: f64| normalize_to_pm180(apparent_solar_longitude(jd) - target);

    let mut t_a = guess - BRACKET_HALF_WIDTH_DAYS;
    let mut t_b = guess + BRACKET_HALF_WIDTH_DAYS;
    let mut f_a = f(t_a);
    let f_b = f(t_b);
    if f_a * f_b > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid);
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
        if (t_b - t_a).abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    let instant = jd_to_instant(0.5 * (t_a + t_b))?;
    instant.duration_round(Duration::minutes(1)).ok()
}

/// Signed hours from the event to `instant` (positive when `instant` is later).
pub fn hours_from(event: &SolarTermEvent, instant: &DateTime<Utc>) -> f64 {
    (instant_to_jd(instant) - instant_to_jd(&event.instant)) * 24.0
}
