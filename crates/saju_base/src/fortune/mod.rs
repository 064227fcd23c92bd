//! Life-period progressions: the decade major fortune (대운) and the yearly
//! fortune window (세운).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

pub mod major;
pub mod yearly;

pub use major::{
    Direction, FortuneCycle, MAJOR_FORTUNE_CYCLES, MajorFortune, default_start_age, fortune_direction,
    major_fortune, start_age_from_days,
};
pub use yearly::{YEARLY_WINDOW_RADIUS, YearlyEntry, yearly_progression};

/// Gender as recorded on the birth record; selects the major-fortune direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "남")]
    Male,
    #[serde(alias = "여")]
    Female,
}

impl Gender {
    pub const fn is_male(self) -> bool {
        matches!(self, Self::Male)
    }

    pub const fn korean(self) -> &'static str {
        match self {
            Self::Male => "남",
            Self::Female => "여",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

impl FromStr for Gender {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "남" => Ok(Self::Male),
            "female" | "f" | "여" => Ok(Self::Female),
            other => Err(BaseError::UnknownGender(other.to_string())),
        }
    }
}
