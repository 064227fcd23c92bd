//! The 60-step sexagenary cycle (yukgap) formed by pairing stems and branches.
//!
//! A single cycle offset `n` drives both sub-cycles, so only the 60 pairs whose
//! stem and branch indices share parity are ever produced.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::BaseError;
use crate::stem::Stem;

/// Length of the combined cycle, lcm(10, 12).
pub const CYCLE_LEN: u8 = 60;

/// Calendar year whose pillar is 甲子 (cycle index 0) in the modern era.
pub const YEAR_EPOCH: i32 = 1984;

/// Offset subtracted from a calendar year before reducing mod 60 (4 CE = 甲子).
pub const YEAR_CYCLE_OFFSET: i32 = 4;

/// Civil date whose day pillar is known: 1900-01-01 = 甲戌.
pub const DAY_EPOCH: (i32, u32, u32) = (1900, 1, 1);

/// Cycle index of the day pillar on [`DAY_EPOCH`] (甲戌).
pub const DAY_EPOCH_CYCLE_INDEX: u8 = 10;

/// A paired stem and branch, e.g. 甲子.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStemBranch")]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

#[derive(Deserialize)]
struct RawStemBranch {
    stem: Stem,
    branch: Branch,
}

impl TryFrom<RawStemBranch> for StemBranch {
    type Error = BaseError;

    fn try_from(raw: RawStemBranch) -> Result<Self, Self::Error> {
        StemBranch::new(raw.stem, raw.branch).ok_or_else(|| {
            BaseError::ParityMismatch(format!("{}{}", raw.stem, raw.branch))
        })
    }
}

impl StemBranch {
    /// Pair a stem and branch; `None` when their parities differ.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Pillar at cycle offset `n` (any integer, reduced mod 60).
    pub const fn from_cycle_index(n: i64) -> Self {
        let n = n.rem_euclid(CYCLE_LEN as i64);
        Self {
            stem: Stem::from_index((n % 10) as u8),
            branch: Branch::from_index((n % 12) as u8),
        }
    }

    /// Position in the 60-cycle (甲子 = 0, 癸亥 = 59).
    pub const fn cycle_index(self) -> u8 {
        // n ≡ s (mod 10), n ≡ b (mod 12)  ⇒  n = 6s − 5b (mod 60)
        let n = 6 * self.stem.index() as i16 - 5 * self.branch.index() as i16;
        n.rem_euclid(CYCLE_LEN as i16) as u8
    }

    /// Step `steps` positions along the cycle (negative steps go backward).
    pub const fn offset(self, steps: i64) -> Self {
        Self::from_cycle_index(self.cycle_index() as i64 + steps)
    }

    /// Korean reading, e.g. 갑자.
    pub fn korean(self) -> String {
        format!("{}{}", self.stem.korean(), self.branch.korean())
    }

    /// All 60 pillars in cycle order.
    pub fn all() -> impl Iterator<Item = StemBranch> {
        (0..CYCLE_LEN as i64).map(Self::from_cycle_index)
    }
}

impl Display for StemBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for StemBranch {
    type Err = BaseError;

    /// Accepts two hanja glyphs (`甲子`) or two Korean syllables (`갑자`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BaseError::InvalidPillar(s.to_string()));
        };
        let stem: Stem = first.to_string().parse()?;
        let branch: Branch = second.to_string().parse()?;
        StemBranch::new(stem, branch).ok_or_else(|| BaseError::ParityMismatch(s.to_string()))
    }
}

/// Pillar of a (solar-adjusted) calendar year.
pub const fn year_stem_branch(year: i32) -> StemBranch {
    StemBranch::from_cycle_index((year - YEAR_CYCLE_OFFSET) as i64)
}

/// Days from [`DAY_EPOCH`] to `date` (negative before it).
pub fn days_since_day_epoch(date: NaiveDate) -> i64 {
    let (y, m, d) = DAY_EPOCH;
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(epoch) => (date - epoch).num_days(),
        None => 0,
    }
}

/// Pillar of a civil day.
pub fn day_stem_branch(date: NaiveDate) -> StemBranch {
    StemBranch::from_cycle_index(DAY_EPOCH_CYCLE_INDEX as i64 + days_since_day_epoch(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sb(s: &str) -> StemBranch {
        s.parse().unwrap()
    }

    #[test]
    fn epochs_pinned() {
        assert_eq!(year_stem_branch(YEAR_EPOCH), sb("甲子"));
        assert_eq!(
            day_stem_branch(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()),
            sb("甲戌")
        );
        assert_eq!(StemBranch::from_cycle_index(DAY_EPOCH_CYCLE_INDEX as i64), sb("甲戌"));
    }

    #[test]
    fn known_days() {
        let d = |y, m, dd| day_stem_branch(NaiveDate::from_ymd_opt(y, m, dd).unwrap());
        assert_eq!(d(2000, 1, 1), sb("戊午"));
        assert_eq!(d(1899, 12, 31), sb("癸酉"));
    }

    #[test]
    fn known_years() {
        assert_eq!(year_stem_branch(1990), sb("庚午"));
        assert_eq!(year_stem_branch(2024), sb("甲辰"));
        assert_eq!(year_stem_branch(4), sb("甲子"));
    }

    #[test]
    fn cycle_index_round_trip() {
        for n in 0..60 {
            assert_eq!(StemBranch::from_cycle_index(n).cycle_index() as i64, n);
        }
    }

    #[test]
    fn offset_wraps_both_ways() {
        assert_eq!(sb("癸亥").offset(1), sb("甲子"));
        assert_eq!(sb("甲子").offset(-1), sb("癸亥"));
        assert_eq!(sb("丙寅").offset(120), sb("丙寅"));
    }

    #[test]
    fn parity_rejected() {
        assert!(StemBranch::new(Stem::Gap, Branch::Chuk).is_none());
        assert!(matches!("甲丑".parse::<StemBranch>(), Err(BaseError::ParityMismatch(_))));
        assert!(matches!("甲".parse::<StemBranch>(), Err(BaseError::InvalidPillar(_))));
        assert_eq!("갑자".parse::<StemBranch>().unwrap(), sb("甲子"));
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&sb("庚午")).unwrap();
        assert_eq!(json, r#"{"stem":"庚","branch":"午"}"#);
        assert!(serde_json::from_str::<StemBranch>(r#"{"stem":"甲","branch":"丑"}"#).is_err());
    }
}
