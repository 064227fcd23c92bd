//! Advisories: structured reasons a computed value deserves a second look.
//!
//! Calculators never fail on valid typed input. When they fall back to an
//! approximation or land near an ambiguous boundary they still return a value,
//! wrapped in [`Assessed`] together with the advisories that apply.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use saju_time::SolarTerm;

/// Which computation fell back because solar-term data was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    YearPillar,
    MonthPillar,
    MajorFortune,
}

impl Component {
    pub const fn name(self) -> &'static str {
        match self {
            Self::YearPillar => "year pillar",
            Self::MonthPillar => "month pillar",
            Self::MajorFortune => "major fortune",
        }
    }
}

/// A structured advisory code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Advisory {
    /// No solar-term instants for `year`; `component` used its fallback.
    MissingSolarTerms { year: i32, component: Component },
    /// Birth is `minutes` away from `term` (negative: before the term).
    NearSolarTermBoundary { term: SolarTerm, minutes: i64 },
    /// Birth time is unknown and the month-opening `term` begins during the birth date.
    SolarTermOnBirthDate { term: SolarTerm },
    /// Birth hour is 23 or 0, where early/late 子-hour conventions disagree.
    MidnightBranch,
    /// Birth date falls in a historical daylight-saving period.
    SummerTime { year: i32 },
    /// No birth time was supplied; the hour pillar is omitted.
    NoBirthTime,
}

impl Advisory {
    /// Human-readable warning text.
    pub fn message(&self) -> String {
        match self {
            Self::MissingSolarTerms { year, component } => format!(
                "solar-term data missing for {year}; {} uses the approximate fallback",
                component.name()
            ),
            Self::NearSolarTermBoundary { term, minutes } => {
                let side = if *minutes < 0 { "before" } else { "after" };
                format!(
                    "birth is {} minutes {side} {term}; the pillar may change across the boundary",
                    minutes.abs()
                )
            }
            Self::SolarTermOnBirthDate { term } => format!(
                "{term} begins on the birth date; the pillar depends on the unknown birth time"
            ),
            Self::MidnightBranch => {
                "birth hour straddles midnight (子 hour); day pillar conventions differ".to_string()
            }
            Self::SummerTime { year } => format!(
                "birth date falls in the {year} daylight-saving period; clock time may be one hour ahead"
            ),
            Self::NoBirthTime => "no birth time".to_string(),
        }
    }
}

impl Display for Advisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Overall confidence in a computed chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reliability {
    Confirmed,
    NeedsReview,
}

impl Reliability {
    /// `NeedsReview` as soon as any advisory applies.
    pub fn from_advisories(advisories: &[Advisory]) -> Self {
        if advisories.is_empty() {
            Self::Confirmed
        } else {
            Self::NeedsReview
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::NeedsReview => "needs-review",
        }
    }
}

impl Display for Reliability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed value together with the advisories raised while computing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessed<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Assessed<T> {
    /// A value with no advisories.
    pub fn exact(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    /// A value with a single advisory.
    pub fn flagged(value: T, advisory: Advisory) -> Self {
        Self {
            value,
            advisories: vec![advisory],
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Assessed<U> {
        Assessed {
            value: f(self.value),
            advisories: self.advisories,
        }
    }

    /// Move the advisories into `sink` and return the bare value.
    pub fn drain_into(self, sink: &mut Vec<Advisory>) -> T {
        sink.extend(self.advisories);
        self.value
    }

    pub fn is_exact(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn reliability(&self) -> Reliability {
        Reliability::from_advisories(&self.advisories)
    }
}
