//! Major fortune (대운): eight decade pillars stepping from the month pillar.
//!
//! Direction: forward when the year stem's polarity agrees with the gender
//! (yang + male, yin + female), backward otherwise. The start age counts the
//! days from birth to the neighbouring month-opening term in that direction,
//! at three days per year.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use saju_time::{SolarTermEvent, SolarTermTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Gender;
use crate::advisory::{Advisory, Assessed, Component};
use crate::sexagenary::StemBranch;
use crate::stem::Stem;

/// Number of decade cycles generated.
pub const MAJOR_FORTUNE_CYCLES: usize = 8;

/// Years spanned by one cycle.
pub const CYCLE_YEARS: u32 = 10;

/// Days of distance that count as one year of start age.
pub const DAYS_PER_START_YEAR: i64 = 3;

pub const MIN_START_AGE: u32 = 1;
pub const MAX_START_AGE: u32 = 10;

/// Walking direction through the 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 순행
    Forward,
    /// 역행
    Backward,
}

impl Direction {
    /// +1 or −1.
    pub const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub const fn korean(self) -> &'static str {
        match self {
            Self::Forward => "순행",
            Self::Backward => "역행",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Backward => f.write_str("backward"),
        }
    }
}

/// One decade of the major fortune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FortuneCycle {
    pub pillar: StemBranch,
    pub start_age: u32,
    pub end_age: u32,
}

impl FortuneCycle {
    pub fn contains_age(&self, age: u32) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

/// Start age plus the eight consecutive decade cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MajorFortune {
    pub direction: Direction,
    pub start_age: u32,
    pub cycles: [FortuneCycle; MAJOR_FORTUNE_CYCLES],
}

impl MajorFortune {
    /// Build the cycles for a known direction and start age.
    pub fn from_start(month_pillar: StemBranch, direction: Direction, start_age: u32) -> Self {
        let cycles = std::array::from_fn(|k| {
            let k = k as u32;
            let start = start_age + CYCLE_YEARS * k;
            FortuneCycle {
                pillar: month_pillar.offset(direction.sign() * i64::from(k + 1)),
                start_age: start,
                end_age: start + CYCLE_YEARS - 1,
            }
        });
        Self {
            direction,
            start_age,
            cycles,
        }
    }

    /// The cycle running at `age`, if within the eight decades.
    pub fn cycle_at_age(&self, age: u32) -> Option<&FortuneCycle> {
        self.cycles.iter().find(|c| c.contains_age(age))
    }
}

/// Forward iff (year stem is yang) == (gender is male).
pub const fn fortune_direction(gender: Gender, year_stem: Stem) -> Direction {
    if year_stem.polarity().is_yang() == gender.is_male() {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Start age for a whole-day distance: days / 3 rounded to nearest, clamped to 1..=10.
pub fn start_age_from_days(days: i64) -> u32 {
    let years = (days.max(0) + 1) / DAYS_PER_START_YEAR;
    years.clamp(i64::from(MIN_START_AGE), i64::from(MAX_START_AGE)) as u32
}

/// Start age used when term data is unavailable.
pub const fn default_start_age(gender: Gender) -> u32 {
    match gender {
        Gender::Male => 7,
        Gender::Female => 6,
    }
}

/// The month-opening term reached from `instant` walking in `direction`.
fn neighbouring_term(
    table: &SolarTermTable,
    instant: &DateTime<Utc>,
    year: i32,
    direction: Direction,
) -> Option<SolarTermEvent> {
    let events = table.boundary_events_in(year - 1..=year + 1);
    match direction {
        Direction::Forward => events.into_iter().find(|e| e.instant > *instant),
        Direction::Backward => events.into_iter().take_while(|e| e.instant <= *instant).last(),
    }
}

/// Major fortune for a birth.
///
/// `year` is the local calendar year of birth, `instant` the birth instant.
pub fn major_fortune(
    table: &SolarTermTable,
    instant: &DateTime<Utc>,
    year: i32,
    gender: Gender,
    year_stem: Stem,
    month_pillar: StemBranch,
) -> Assessed<MajorFortune> {
    let direction = fortune_direction(gender, year_stem);
    let term = if table.covers(year) {
        neighbouring_term(table, instant, year, direction)
    } else {
        None
    };
    match term {
        Some(event) => {
            let days = (event.instant - *instant).num_seconds().abs() / 86_400;
            let start_age = start_age_from_days(days);
            debug!(%direction, term = %event.term, days, start_age, "major fortune start");
            Assessed::exact(MajorFortune::from_start(month_pillar, direction, start_age))
        }
        None => {
            let start_age = default_start_age(gender);
            warn!(year, start_age, "no neighbouring term; default major-fortune start age");
            Assessed::flagged(
                MajorFortune::from_start(month_pillar, direction, start_age),
                Advisory::MissingSolarTerms {
                    year,
                    component: Component::MajorFortune,
                },
            )
        }
    }
}
