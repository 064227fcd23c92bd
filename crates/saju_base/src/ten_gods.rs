//! Ten gods (sipseong): the relation of any stem or branch to the day stem.
//!
//! The element relation picks one of five families; matching polarity picks
//! the first label of the family's pair, differing polarity the second.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;
use crate::pillar::FourPillars;
use crate::stem::Stem;

/// Element relation of a target to the day stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TenGodFamily {
    /// Same element (比劫).
    Peer,
    /// Day element generates target (食傷).
    Output,
    /// Day element restrains target (財星).
    Wealth,
    /// Target restrains day element (官星).
    Authority,
    /// Target generates day element (印星).
    Resource,
}

impl TenGodFamily {
    /// Relation of `target` seen from `day`.
    pub const fn between(day: Element, target: Element) -> Self {
        if day.index() == target.index() {
            Self::Peer
        } else if day.generates().index() == target.index() {
            Self::Output
        } else if day.restrains().index() == target.index() {
            Self::Wealth
        } else if target.restrains().index() == day.index() {
            Self::Authority
        } else {
            Self::Resource
        }
    }

    /// Korean family name.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Peer => "비겁",
            Self::Output => "식상",
            Self::Wealth => "재성",
            Self::Authority => "관성",
            Self::Resource => "인성",
        }
    }
}

/// The ten relation labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TenGod {
    Companion,
    RobWealth,
    EatingGod,
    HurtingOfficer,
    IndirectWealth,
    DirectWealth,
    SevenKillings,
    DirectOfficer,
    IndirectResource,
    DirectResource,
}

/// All ten labels, family by family.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Companion,
    TenGod::RobWealth,
    TenGod::EatingGod,
    TenGod::HurtingOfficer,
    TenGod::IndirectWealth,
    TenGod::DirectWealth,
    TenGod::SevenKillings,
    TenGod::DirectOfficer,
    TenGod::IndirectResource,
    TenGod::DirectResource,
];

impl TenGod {
    /// Label for a family, split by polarity match.
    pub const fn from_family(family: TenGodFamily, same_polarity: bool) -> Self {
        match (family, same_polarity) {
            (TenGodFamily::Peer, true) => Self::Companion,
            (TenGodFamily::Peer, false) => Self::RobWealth,
            (TenGodFamily::Output, true) => Self::EatingGod,
            (TenGodFamily::Output, false) => Self::HurtingOfficer,
            (TenGodFamily::Wealth, true) => Self::IndirectWealth,
            (TenGodFamily::Wealth, false) => Self::DirectWealth,
            (TenGodFamily::Authority, true) => Self::SevenKillings,
            (TenGodFamily::Authority, false) => Self::DirectOfficer,
            (TenGodFamily::Resource, true) => Self::IndirectResource,
            (TenGodFamily::Resource, false) => Self::DirectResource,
        }
    }

    pub const fn family(self) -> TenGodFamily {
        match self {
            Self::Companion | Self::RobWealth => TenGodFamily::Peer,
            Self::EatingGod | Self::HurtingOfficer => TenGodFamily::Output,
            Self::IndirectWealth | Self::DirectWealth => TenGodFamily::Wealth,
            Self::SevenKillings | Self::DirectOfficer => TenGodFamily::Authority,
            Self::IndirectResource | Self::DirectResource => TenGodFamily::Resource,
        }
    }

    pub const fn korean(self) -> &'static str {
        match self {
            Self::Companion => "비견",
            Self::RobWealth => "겁재",
            Self::EatingGod => "식신",
            Self::HurtingOfficer => "상관",
            Self::IndirectWealth => "편재",
            Self::DirectWealth => "정재",
            Self::SevenKillings => "편관",
            Self::DirectOfficer => "정관",
            Self::IndirectResource => "편인",
            Self::DirectResource => "정인",
        }
    }

    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫財",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "傷官",
            Self::IndirectWealth => "偏財",
            Self::DirectWealth => "正財",
            Self::SevenKillings => "偏官",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }

    /// Short traits associated with the label.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Companion => "동료, 경쟁자, 형제",
            Self::RobWealth => "욕심, 투쟁, 야망",
            Self::EatingGod => "재능, 표현, 자식",
            Self::HurtingOfficer => "반항, 창의, 개성",
            Self::IndirectWealth => "투자, 사업, 큰 재물",
            Self::DirectWealth => "안정적 재물, 월급",
            Self::SevenKillings => "권력, 도전, 변화",
            Self::DirectOfficer => "명예, 직장, 규칙",
            Self::IndirectResource => "예술, 종교, 특수재능",
            Self::DirectResource => "학문, 어머니, 전통",
        }
    }
}

impl Display for TenGod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.korean())
    }
}

/// Ten god of `target` relative to `day_stem`.
pub const fn ten_god(day_stem: Stem, target: Stem) -> TenGod {
    let family = TenGodFamily::between(day_stem.element(), target.element());
    let same = day_stem.polarity().is_yang() == target.polarity().is_yang();
    TenGod::from_family(family, same)
}

/// Ten god of a branch through its main hidden stem.
pub const fn branch_ten_god(day_stem: Stem, branch: Branch) -> TenGod {
    ten_god(day_stem, branch.main_stem())
}

/// Ten gods of every hidden stem of `branch`, main stem first.
pub fn hidden_stem_ten_gods(day_stem: Stem, branch: Branch) -> Vec<(Stem, TenGod)> {
    branch
        .hidden_stems()
        .iter()
        .map(|s| (s, ten_god(day_stem, s)))
        .collect()
}

/// Ten gods of every populated position except the day stem itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenGodsChart {
    pub year_stem: TenGod,
    pub year_branch: TenGod,
    pub month_stem: TenGod,
    pub month_branch: TenGod,
    pub day_branch: TenGod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_stem: Option<TenGod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_branch: Option<TenGod>,
}

impl TenGodsChart {
    /// Map a chart against its own day stem.
    pub fn from_pillars(pillars: &FourPillars) -> Self {
        let day = pillars.day_stem();
        Self {
            year_stem: ten_god(day, pillars.year.stem),
            year_branch: branch_ten_god(day, pillars.year.branch),
            month_stem: ten_god(day, pillars.month.stem),
            month_branch: branch_ten_god(day, pillars.month.branch),
            day_branch: branch_ten_god(day, pillars.day.branch),
            hour_stem: pillars.hour.map(|h| ten_god(day, h.stem)),
            hour_branch: pillars.hour.map(|h| branch_ten_god(day, h.branch)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::ALL_STEMS;

    #[test]
    fn self_is_companion() {
        for s in ALL_STEMS {
            assert_eq!(ten_god(s, s), TenGod::Companion);
        }
    }

    #[test]
    fn gap_day_master_row() {
        let row: Vec<TenGod> = ALL_STEMS.iter().map(|&t| ten_god(Stem::Gap, t)).collect();
        assert_eq!(
            row,
            vec![
                TenGod::Companion,
                TenGod::RobWealth,
                TenGod::EatingGod,
                TenGod::HurtingOfficer,
                TenGod::IndirectWealth,
                TenGod::DirectWealth,
                TenGod::SevenKillings,
                TenGod::DirectOfficer,
                TenGod::IndirectResource,
                TenGod::DirectResource,
            ]
        );
    }

    #[test]
    fn gap_against_horse_branch() {
        // 午 hides 丁 (yin fire): wood feeds fire, polarity differs.
        assert_eq!(branch_ten_god(Stem::Gap, Branch::O), TenGod::HurtingOfficer);
    }

    #[test]
    fn family_round_trip() {
        for g in ALL_TEN_GODS {
            let same = matches!(
                g,
                TenGod::Companion
                    | TenGod::EatingGod
                    | TenGod::IndirectWealth
                    | TenGod::SevenKillings
                    | TenGod::IndirectResource
            );
            assert_eq!(TenGod::from_family(g.family(), same), g);
        }
    }

    #[test]
    fn hidden_stems_of_in() {
        let got = hidden_stem_ten_gods(Stem::Gap, Branch::In);
        assert_eq!(
            got,
            vec![
                (Stem::Gap, TenGod::Companion),
                (Stem::Byeong, TenGod::EatingGod),
                (Stem::Mu, TenGod::IndirectWealth),
            ]
        );
    }
}
