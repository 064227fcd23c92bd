//! The four pillars (saju) and the calculator that derives them from a birth moment.
//!
//! Solar-term instants decide both the year boundary (입춘) and the month
//! boundaries (the 12 month-opening terms). When a year is missing from the
//! table, the calculator falls back to calendar approximations and reports a
//! [`Advisory::MissingSolarTerms`].

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use saju_time::{CivilMoment, ClockTime, SolarTerm, SolarTermTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::advisory::{Advisory, Assessed, Component};
use crate::branch::Branch;
use crate::sexagenary::{StemBranch, day_stem_branch, year_stem_branch};
use crate::stem::Stem;
use crate::util::cycle_offset;

/// One of the four pillar positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarSlot {
    Year,
    Month,
    Day,
    Hour,
}

/// All four slots in chart order.
pub const ALL_SLOTS: [PillarSlot; 4] = [
    PillarSlot::Year,
    PillarSlot::Month,
    PillarSlot::Day,
    PillarSlot::Hour,
];

impl PillarSlot {
    /// Lowercase English label, as used in marker pair positions.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// Korean label (년/월/일/시).
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Year => "년",
            Self::Month => "월",
            Self::Day => "일",
            Self::Hour => "시",
        }
    }
}

impl Display for PillarSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Year, month and day pillars, plus the hour pillar when the birth time is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<StemBranch>,
}

impl FourPillars {
    /// Pillar occupying `slot`, if present.
    pub fn get(&self, slot: PillarSlot) -> Option<StemBranch> {
        match slot {
            PillarSlot::Year => Some(self.year),
            PillarSlot::Month => Some(self.month),
            PillarSlot::Day => Some(self.day),
            PillarSlot::Hour => self.hour,
        }
    }

    /// Present pillars with their slots, in chart order.
    pub fn slots(&self) -> Vec<(PillarSlot, StemBranch)> {
        ALL_SLOTS
            .iter()
            .filter_map(|&slot| self.get(slot).map(|p| (slot, p)))
            .collect()
    }

    /// Stems of the present pillars, in chart order.
    pub fn stems(&self) -> Vec<Stem> {
        self.slots().into_iter().map(|(_, p)| p.stem).collect()
    }

    /// Branches of the present pillars, in chart order.
    pub fn branches(&self) -> Vec<Branch> {
        self.slots().into_iter().map(|(_, p)| p.branch).collect()
    }

    /// The day master (日干), reference stem for ten gods and markers.
    pub fn day_stem(&self) -> Stem {
        self.day.stem
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.hour {
            Some(hour) => write!(f, "{} {} {} {}", self.year, self.month, self.day, hour),
            None => write!(f, "{} {} {} --", self.year, self.month, self.day),
        }
    }
}

/// Month branches by calendar month used when term data is missing.
///
/// Indexed by `(month + 10) % 12`; kept exactly as historically computed.
const FALLBACK_MONTH_BRANCHES: [Branch; 12] = [
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
    Branch::Ja,
    Branch::Chuk,
];

/// First-month (寅) stem for each year-stem pair: 甲己→丙, 乙庚→戊, 丙辛→庚, 丁壬→壬, 戊癸→甲.
const TIGER_MONTH_STEMS: [Stem; 5] = [Stem::Byeong, Stem::Mu, Stem::Gyeong, Stem::Im, Stem::Gap];

/// Branch opened by a month-opening solar term (입춘 → 寅 .. 소한 → 丑).
pub const fn term_branch(term: SolarTerm) -> Branch {
    Branch::from_index(term.month_ordinal() + Branch::In.index())
}

/// Year pillar: years begin at 입춘, not 1 January.
pub fn year_pillar(table: &SolarTermTable, moment: &CivilMoment) -> Assessed<StemBranch> {
    let year = moment.year();
    match table.instant(year, SolarTerm::Ipchun) {
        Some(ipchun) => {
            let pillar_year = if moment.instant() < ipchun { year - 1 } else { year };
            Assessed::exact(year_stem_branch(pillar_year))
        }
        None => {
            warn!(year, "no 입춘 instant; using 4 February as the year boundary");
            let before = moment.month() == 1 || (moment.month() == 2 && moment.day() < 4);
            let pillar_year = if before { year - 1 } else { year };
            Assessed::flagged(
                year_stem_branch(pillar_year),
                Advisory::MissingSolarTerms {
                    year,
                    component: Component::YearPillar,
                },
            )
        }
    }
}

/// Month branch: the branch of the last month-opening term at or before the birth.
///
/// January births also consult the previous year's terms (대설, 소한 boundaries
/// around New Year).
pub fn month_branch(table: &SolarTermTable, moment: &CivilMoment) -> Assessed<Branch> {
    let year = moment.year();
    let instant = moment.instant();
    if table.covers(year) {
        let first = if moment.month() == 1 { year - 1 } else { year };
        let found = table
            .boundary_events_in(first..=year)
            .into_iter()
            .take_while(|e| e.instant <= instant)
            .last();
        if let Some(event) = found {
            debug!(term = %event.term, "month boundary");
            return Assessed::exact(term_branch(event.term));
        }
    }
    warn!(year, month = moment.month(), "month branch from calendar month fallback");
    let branch = FALLBACK_MONTH_BRANCHES[((moment.month() + 10) % 12) as usize];
    Assessed::flagged(
        branch,
        Advisory::MissingSolarTerms {
            year,
            component: Component::MonthPillar,
        },
    )
}

/// Month stem from the year stem and month branch (the 5-tiger rule, 五虎遁).
pub const fn month_stem(year_stem: Stem, branch: Branch) -> Stem {
    let start = TIGER_MONTH_STEMS[(year_stem.index() % 5) as usize];
    let months_from_tiger = cycle_offset(branch.index(), Branch::In.index(), 12);
    Stem::from_index(start.index() + months_from_tiger)
}

/// Month pillar for a birth whose year stem is already known.
pub fn month_pillar(
    table: &SolarTermTable,
    moment: &CivilMoment,
    year_stem: Stem,
) -> Assessed<StemBranch> {
    month_branch(table, moment).map(|branch| StemBranch {
        stem: month_stem(year_stem, branch),
        branch,
    })
}

/// Day pillar of the local civil date.
pub fn day_pillar(date: NaiveDate) -> StemBranch {
    day_stem_branch(date)
}

/// Two-hour branch window containing `hour` (23:00–00:59 is 子).
pub const fn hour_branch(hour: u32) -> Branch {
    Branch::from_index((((hour + 1) / 2) % 12) as u8)
}

/// Hour stem from the day stem and hour branch (the 5-rat rule, 五鼠遁).
pub const fn hour_stem(day_stem: Stem, branch: Branch) -> Stem {
    Stem::from_index((day_stem.index() % 5) * 2 + branch.index())
}

/// Hour pillar for a clock time. 23:xx keeps the same civil day's day stem.
pub const fn hour_pillar(day_stem: Stem, time: ClockTime) -> StemBranch {
    let branch = hour_branch(time.hour());
    StemBranch {
        stem: hour_stem(day_stem, branch),
        branch,
    }
}

/// All four pillars for a birth moment.
///
/// Advisories cover missing term data, an unknown birth time and a birth
/// hour at the midnight 子 boundary.
pub fn four_pillars(table: &SolarTermTable, moment: &CivilMoment) -> Assessed<FourPillars> {
    let mut advisories = Vec::new();
    let year = year_pillar(table, moment).drain_into(&mut advisories);
    let month = month_pillar(table, moment, year.stem).drain_into(&mut advisories);
    let day = day_pillar(moment.date);
    let hour = match moment.time {
        Some(time) => {
            if matches!(time.hour(), 23 | 0) {
                advisories.push(Advisory::MidnightBranch);
            }
            Some(hour_pillar(day.stem, time))
        }
        None => {
            advisories.push(Advisory::NoBirthTime);
            None
        }
    };
    let pillars = FourPillars {
        year,
        month,
        day,
        hour,
    };
    debug!(%pillars, "four pillars");
    Assessed {
        value: pillars,
        advisories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_time::{KST_OFFSET_MINUTES, utc_offset_from_minutes};

    fn moment(y: i32, m: u32, d: u32, time: Option<(u32, u32)>) -> CivilMoment {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let time = time.map(|(h, mi)| ClockTime::new(h, mi).unwrap());
        CivilMoment::new(date, time, utc_offset_from_minutes(KST_OFFSET_MINUTES).unwrap())
    }

    fn sb(s: &str) -> StemBranch {
        s.parse().unwrap()
    }

    #[test]
    fn term_branches() {
        assert_eq!(term_branch(SolarTerm::Ipchun), Branch::In);
        assert_eq!(term_branch(SolarTerm::Daeseol), Branch::Ja);
        assert_eq!(term_branch(SolarTerm::Sohan), Branch::Chuk);
    }

    #[test]
    fn tiger_rule() {
        assert_eq!(month_stem(Stem::Gap, Branch::In), Stem::Byeong);
        assert_eq!(month_stem(Stem::Gi, Branch::In), Stem::Byeong);
        assert_eq!(month_stem(Stem::Gyeong, Branch::Ja), Stem::Mu);
        assert_eq!(month_stem(Stem::Gye, Branch::Chuk), Stem::Eul);
    }

    #[test]
    fn rat_rule() {
        assert_eq!(hour_branch(23), Branch::Ja);
        assert_eq!(hour_branch(0), Branch::Ja);
        assert_eq!(hour_branch(1), Branch::Chuk);
        assert_eq!(hour_branch(12), Branch::O);
        assert_eq!(hour_branch(22), Branch::Hae);
        assert_eq!(hour_stem(Stem::Gap, Branch::Ja), Stem::Gap);
        assert_eq!(hour_stem(Stem::Eul, Branch::Ja), Stem::Byeong);
        assert_eq!(hour_stem(Stem::Gye, Branch::Hae), Stem::Gye);
    }

    #[test]
    fn fallback_month_table_preserved() {
        let empty = SolarTermTable::empty();
        let got: Vec<Branch> = (1..=12)
            .map(|m| month_branch(&empty, &moment(2000, m, 15, None)).value)
            .collect();
        let expected: Vec<Branch> = (1..=12u32)
            .map(|m| FALLBACK_MONTH_BRANCHES[((m + 10) % 12) as usize])
            .collect();
        assert_eq!(got, expected);
        assert_eq!(got[0], Branch::Chuk);
        assert_eq!(got[1], Branch::In);
    }

    #[test]
    fn year_fallback_uses_feb_fourth() {
        let empty = SolarTermTable::empty();
        let a = year_pillar(&empty, &moment(1990, 2, 3, None));
        let b = year_pillar(&empty, &moment(1990, 2, 4, None));
        assert_eq!(a.value, year_stem_branch(1989));
        assert_eq!(b.value, year_stem_branch(1990));
        assert!(!a.is_exact());
    }

    #[test]
    fn computed_table_scenario() {
        let table = SolarTermTable::computed(1989..=1991);
        let got = four_pillars(&table, &moment(1990, 12, 25, None));
        assert_eq!(got.value.year, sb("庚午"));
        assert_eq!(got.value.month, sb("戊子"));
        assert_eq!(got.value.hour, None);
        assert_eq!(got.advisories, vec![Advisory::NoBirthTime]);
    }

    #[test]
    fn january_before_sohan_is_previous_ja_month() {
        let table = SolarTermTable::computed(1999..=2000);
        let got = four_pillars(&table, &moment(2000, 1, 2, Some((12, 0))));
        assert_eq!(got.value.year, sb("己卯"));
        assert_eq!(got.value.month.branch, Branch::Ja);
        assert!(got.is_exact());
    }

    #[test]
    fn midnight_flagged() {
        let table = SolarTermTable::computed(2000..=2000);
        let got = four_pillars(&table, &moment(2000, 6, 15, Some((23, 30))));
        assert_eq!(got.advisories, vec![Advisory::MidnightBranch]);
        assert_eq!(got.value.hour.map(|h| h.branch), Some(Branch::Ja));
    }
}
