//! Marker catalog (shinsal): ten independent pattern rules over the four pillars.
//!
//! Each rule only reads the pillars and never another rule's result. Detected
//! positions are merged as a set per marker kind, so the same slot found from
//! two anchors (year branch and day branch) is reported once.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::BaseError;
use crate::pillar::{FourPillars, PillarSlot};
use crate::sexagenary::StemBranch;
use crate::stem::Stem;
use crate::util::glyph_serde;

/// The ten markers, declared in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Yangin,
    Dohwa,
    Yeokma,
    Hwagae,
    Gwimun,
    Baekho,
    Gwaegang,
    Hongyeom,
    Geupgak,
    Wonjin,
}

/// All markers in presentation order.
pub const ALL_MARKER_KINDS: [MarkerKind; 10] = [
    MarkerKind::Yangin,
    MarkerKind::Dohwa,
    MarkerKind::Yeokma,
    MarkerKind::Hwagae,
    MarkerKind::Gwimun,
    MarkerKind::Baekho,
    MarkerKind::Gwaegang,
    MarkerKind::Hongyeom,
    MarkerKind::Geupgak,
    MarkerKind::Wonjin,
];

impl MarkerKind {
    /// Stable id (matches the serde form).
    pub const fn id(self) -> &'static str {
        match self {
            Self::Yangin => "yangin",
            Self::Dohwa => "dohwa",
            Self::Yeokma => "yeokma",
            Self::Hwagae => "hwagae",
            Self::Gwimun => "gwimun",
            Self::Baekho => "baekho",
            Self::Gwaegang => "gwaegang",
            Self::Hongyeom => "hongyeom",
            Self::Geupgak => "geupgak",
            Self::Wonjin => "wonjin",
        }
    }

    pub const fn korean(self) -> &'static str {
        match self {
            Self::Yangin => "양인살",
            Self::Dohwa => "도화살",
            Self::Yeokma => "역마살",
            Self::Hwagae => "화개살",
            Self::Gwimun => "귀문관살",
            Self::Baekho => "백호대살",
            Self::Gwaegang => "괴강살",
            Self::Hongyeom => "홍염살",
            Self::Geupgak => "급각살",
            Self::Wonjin => "원진살",
        }
    }

    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Yangin => "羊刃殺",
            Self::Dohwa => "桃花殺",
            Self::Yeokma => "驛馬殺",
            Self::Hwagae => "華蓋殺",
            Self::Gwimun => "鬼門關殺",
            Self::Baekho => "白虎大殺",
            Self::Gwaegang => "魁罡殺",
            Self::Hongyeom => "紅艶殺",
            Self::Geupgak => "急脚殺",
            Self::Wonjin => "元嗔殺",
        }
    }

    /// Category shown alongside the marker.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Yangin | Self::Gwaegang => "성격",
            Self::Dohwa => "인연",
            Self::Yeokma => "이동",
            Self::Hwagae => "재능",
            Self::Gwimun => "장애",
            Self::Baekho => "사고",
            Self::Hongyeom => "매력",
            Self::Geupgak => "변화",
            Self::Wonjin => "관계",
        }
    }

    /// One-line effect description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Yangin => "극단적, 강인함, 승부욕",
            Self::Dohwa => "매력, 인기, 이성운",
            Self::Yeokma => "이동, 변화, 출장이 많음",
            Self::Hwagae => "예술, 종교, 학문적 재능",
            Self::Gwimun => "어려움, 장애, 고난",
            Self::Baekho => "사고, 수술, 급변",
            Self::Gwaegang => "독립적, 카리스마, 리더십",
            Self::Hongyeom => "열정, 화려함, 이성적 매력",
            Self::Geupgak => "급진적 변화, 빠른 전개",
            Self::Wonjin => "갈등, 불화, 대립",
        }
    }
}

impl Display for MarkerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.korean())
    }
}

/// Where a marker was found: a single slot, or an unordered slot pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerPosition {
    Slot(PillarSlot),
    /// Always stored with the earlier slot first.
    Pair(PillarSlot, PillarSlot),
}

impl MarkerPosition {
    pub fn pair(a: PillarSlot, b: PillarSlot) -> Self {
        Self::Pair(a.min(b), a.max(b))
    }

    /// Korean label, e.g. `일` or `년-일`.
    pub fn korean(self) -> String {
        match self {
            Self::Slot(s) => s.korean().to_string(),
            Self::Pair(a, b) => format!("{}-{}", a.korean(), b.korean()),
        }
    }
}

impl Display for MarkerPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot(s) => f.write_str(s.label()),
            Self::Pair(a, b) => write!(f, "{}-{}", a.label(), b.label()),
        }
    }
}

fn parse_slot(s: &str) -> Option<PillarSlot> {
    match s {
        "year" => Some(PillarSlot::Year),
        "month" => Some(PillarSlot::Month),
        "day" => Some(PillarSlot::Day),
        "hour" => Some(PillarSlot::Hour),
        _ => None,
    }
}

impl FromStr for MarkerPosition {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BaseError::InvalidPosition(s.to_string());
        match s.split_once('-') {
            Some((a, b)) => Ok(Self::pair(
                parse_slot(a).ok_or_else(invalid)?,
                parse_slot(b).ok_or_else(invalid)?,
            )),
            None => parse_slot(s).map(Self::Slot).ok_or_else(invalid),
        }
    }
}

glyph_serde!(MarkerPosition);

/// One detected marker with its positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MarkerRecord", from = "MarkerRecord")]
pub struct Marker {
    pub kind: MarkerKind,
    pub positions: BTreeSet<MarkerPosition>,
}

impl Marker {
    /// Number of matched slots or slot pairs.
    pub fn count(&self) -> usize {
        self.positions.len()
    }
}

/// Flat serialized form of a [`Marker`].
#[derive(Serialize, Deserialize)]
struct MarkerRecord {
    id: MarkerKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    hanja: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    positions: Vec<MarkerPosition>,
    #[serde(default)]
    count: usize,
}

impl From<Marker> for MarkerRecord {
    fn from(m: Marker) -> Self {
        Self {
            id: m.kind,
            name: m.kind.korean().to_string(),
            hanja: m.kind.hanja().to_string(),
            category: m.kind.category().to_string(),
            description: m.kind.description().to_string(),
            count: m.count(),
            positions: m.positions.into_iter().collect(),
        }
    }
}

impl From<MarkerRecord> for Marker {
    fn from(r: MarkerRecord) -> Self {
        Self {
            kind: r.id,
            positions: r.positions.into_iter().collect(),
        }
    }
}

/// Detected markers keyed by kind; iteration follows presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Marker>", from = "Vec<Marker>")]
pub struct MarkerCatalog {
    found: BTreeMap<MarkerKind, BTreeSet<MarkerPosition>>,
}

impl MarkerCatalog {
    fn insert(&mut self, kind: MarkerKind, position: MarkerPosition) {
        self.found.entry(kind).or_default().insert(position);
    }

    /// Positions of `kind`, if detected.
    pub fn positions(&self, kind: MarkerKind) -> Option<&BTreeSet<MarkerPosition>> {
        self.found.get(&kind)
    }

    pub fn contains(&self, kind: MarkerKind) -> bool {
        self.found.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// Detected kinds in presentation order.
    pub fn kinds(&self) -> impl Iterator<Item = MarkerKind> + '_ {
        self.found.keys().copied()
    }

    /// Flat list in presentation order.
    pub fn to_list(&self) -> Vec<Marker> {
        self.found
            .iter()
            .map(|(&kind, positions)| Marker {
                kind,
                positions: positions.clone(),
            })
            .collect()
    }

    /// Markers of a full chart.
    pub fn from_pillars(pillars: &FourPillars) -> Self {
        detect_markers(&pillars.slots())
    }
}

impl From<MarkerCatalog> for Vec<Marker> {
    fn from(catalog: MarkerCatalog) -> Self {
        catalog.to_list()
    }
}

impl From<Vec<Marker>> for MarkerCatalog {
    fn from(list: Vec<Marker>) -> Self {
        let mut catalog = MarkerCatalog::default();
        for marker in list {
            for position in marker.positions {
                catalog.insert(marker.kind, position);
            }
        }
        catalog
    }
}

// Rule tables ----------------------------------------------------------------

/// Index of the branch's three-harmony group: 0 寅午戌, 1 申子辰, 2 巳酉丑, 3 亥卯未.
const fn trine_group(b: Branch) -> u8 {
    match b {
        Branch::In | Branch::O | Branch::Sul => 0,
        Branch::Sin | Branch::Ja | Branch::Jin => 1,
        Branch::Sa | Branch::Yu | Branch::Chuk => 2,
        Branch::Hae | Branch::Myo | Branch::Mi => 3,
    }
}

/// 桃花 target for an anchor branch.
pub const fn dohwa_target(anchor: Branch) -> Branch {
    [Branch::Myo, Branch::Yu, Branch::O, Branch::Ja][trine_group(anchor) as usize]
}

/// 驛馬 target for an anchor branch.
pub const fn yeokma_target(anchor: Branch) -> Branch {
    [Branch::Sin, Branch::In, Branch::Hae, Branch::Sa][trine_group(anchor) as usize]
}

/// 華蓋 target for an anchor branch.
pub const fn hwagae_target(anchor: Branch) -> Branch {
    [Branch::Sul, Branch::Jin, Branch::Chuk, Branch::Mi][trine_group(anchor) as usize]
}

/// 羊刃 branch of a day stem.
pub const fn yangin_target(day: Stem) -> Branch {
    match day {
        Stem::Gap => Branch::Myo,
        Stem::Eul => Branch::In,
        Stem::Byeong | Stem::Mu => Branch::O,
        Stem::Jeong | Stem::Gi => Branch::Sa,
        Stem::Gyeong => Branch::Yu,
        Stem::Sin => Branch::Sin,
        Stem::Im => Branch::Ja,
        Stem::Gye => Branch::Hae,
    }
}

/// 鬼門關 branch of a day stem.
pub const fn gwimun_target(day: Stem) -> Branch {
    match day {
        Stem::Gap | Stem::Eul => Branch::Sul,
        Stem::Byeong | Stem::Jeong | Stem::Mu | Stem::Gi => Branch::Chuk,
        Stem::Gyeong | Stem::Sin => Branch::Jin,
        Stem::Im | Stem::Gye => Branch::Mi,
    }
}

/// 紅艶 branch of a day stem.
pub const fn hongyeom_target(day: Stem) -> Branch {
    match day {
        Stem::Gap => Branch::O,
        Stem::Eul | Stem::Gye => Branch::Sin,
        Stem::Byeong => Branch::In,
        Stem::Jeong => Branch::Mi,
        Stem::Mu | Stem::Gi => Branch::Jin,
        Stem::Gyeong => Branch::Sul,
        Stem::Sin => Branch::Yu,
        Stem::Im => Branch::Ja,
    }
}

/// 白虎大殺 branch per day pillar, indexed by cycle position (甲子 = 0).
const BAEKHO_TARGETS: [Branch; 60] = {
    use Branch::*;
    [
        Sul, Jin, O, Mi, In, Yu, Sul, Myo, O, Mi, // 甲子 .. 癸酉
        Sin, Sa, O, Mi, Ja, Yu, Sul, Myo, Ja, Yu, // 甲戌 .. 癸未
        O, Mi, In, Sa, O, Mi, Sin, Sa, Ja, Yu, // 甲申 .. 癸巳
        Sul, Myo, O, Mi, In, Yu, Sul, Myo, Sin, Sa, // 甲午 .. 癸卯
        Ja, Yu, Sul, Myo, O, Mi, Sin, Sa, O, Mi, // 甲辰 .. 癸丑
        Sin, Sa, Ja, Yu, Sul, Myo, O, Mi, In, Yu, // 甲寅 .. 癸亥
    ]
};

/// 白虎大殺 branch of a day pillar.
pub const fn baekho_target(day: StemBranch) -> Branch {
    BAEKHO_TARGETS[day.cycle_index() as usize]
}

/// 魁罡 day pillars: 庚辰 庚戌 壬辰 壬戌 戊戌.
pub const fn is_gwaegang(day: StemBranch) -> bool {
    matches!(
        (day.stem, day.branch),
        (Stem::Gyeong, Branch::Jin)
            | (Stem::Gyeong, Branch::Sul)
            | (Stem::Im, Branch::Jin)
            | (Stem::Im, Branch::Sul)
            | (Stem::Mu, Branch::Sul)
    )
}

/// 急脚 day pillars: 甲子 甲午 戊辰 戊戌 庚辰 庚戌.
pub const fn is_geupgak(day: StemBranch) -> bool {
    matches!(
        (day.stem, day.branch),
        (Stem::Gap, Branch::Ja)
            | (Stem::Gap, Branch::O)
            | (Stem::Mu, Branch::Jin)
            | (Stem::Mu, Branch::Sul)
            | (Stem::Gyeong, Branch::Jin)
            | (Stem::Gyeong, Branch::Sul)
    )
}

/// 元嗔 partner of a branch (子酉 丑戌 寅亥 卯申 辰巳 午未).
pub const fn wonjin_partner(b: Branch) -> Branch {
    match b {
        Branch::Ja => Branch::Yu,
        Branch::Yu => Branch::Ja,
        Branch::Chuk => Branch::Sul,
        Branch::Sul => Branch::Chuk,
        Branch::In => Branch::Hae,
        Branch::Hae => Branch::In,
        Branch::Myo => Branch::Sin,
        Branch::Sin => Branch::Myo,
        Branch::Jin => Branch::Sa,
        Branch::Sa => Branch::Jin,
        Branch::O => Branch::Mi,
        Branch::Mi => Branch::O,
    }
}

// Detection ------------------------------------------------------------------

/// Evaluate every marker rule against slot-labelled pillars.
///
/// Anchors (year branch, day pillar) are looked up by slot, so the order of
/// `pillars` does not affect the result. Rules keyed by the day pillar are
/// skipped when no day slot is given.
pub fn detect_markers(pillars: &[(PillarSlot, StemBranch)]) -> MarkerCatalog {
    let mut sorted = pillars.to_vec();
    sorted.sort();
    sorted.dedup_by_key(|(slot, _)| *slot);

    let find = |slot: PillarSlot| sorted.iter().find(|(s, _)| *s == slot).map(|(_, p)| *p);
    let year = find(PillarSlot::Year);
    let day = find(PillarSlot::Day);

    let mut catalog = MarkerCatalog::default();
    let mut mark_branch = |kind: MarkerKind, target: Branch| {
        for &(slot, p) in &sorted {
            if p.branch == target {
                catalog.insert(kind, MarkerPosition::Slot(slot));
            }
        }
    };

    if let Some(day) = day {
        mark_branch(MarkerKind::Yangin, yangin_target(day.stem));
    }
    for anchor in [year, day].into_iter().flatten() {
        mark_branch(MarkerKind::Dohwa, dohwa_target(anchor.branch));
        mark_branch(MarkerKind::Yeokma, yeokma_target(anchor.branch));
        mark_branch(MarkerKind::Hwagae, hwagae_target(anchor.branch));
    }
    if let Some(day) = day {
        mark_branch(MarkerKind::Gwimun, gwimun_target(day.stem));
        mark_branch(MarkerKind::Baekho, baekho_target(day));
        mark_branch(MarkerKind::Hongyeom, hongyeom_target(day.stem));
        if is_gwaegang(day) {
            catalog.insert(MarkerKind::Gwaegang, MarkerPosition::Slot(PillarSlot::Day));
        }
        if is_geupgak(day) {
            catalog.insert(MarkerKind::Geupgak, MarkerPosition::Slot(PillarSlot::Day));
        }
    }

    for (i, &(slot_a, a)) in sorted.iter().enumerate() {
        for &(slot_b, b) in &sorted[i + 1..] {
            if wonjin_partner(a.branch) == b.branch {
                catalog.insert(MarkerKind::Wonjin, MarkerPosition::pair(slot_a, slot_b));
            }
        }
    }

    catalog
}
