//! The twelve earthly branches (jiji) and their hidden stems (jijanggan).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::element::{Element, Polarity};
use crate::error::BaseError;
use crate::stem::Stem;
use crate::util::glyph_serde;

/// The 12 earthly branches in cycle order, starting from Ja (子).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in order (0 = 子, 11 = 亥).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
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
];

/// Hidden stems of a branch: main (bongi), middle (junggi), residual (yeogi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HiddenStems {
    pub main: Stem,
    pub middle: Option<Stem>,
    pub residual: Option<Stem>,
}

impl HiddenStems {
    /// Hidden stems in main → middle → residual order.
    pub fn iter(&self) -> impl Iterator<Item = Stem> {
        std::iter::once(self.main).chain(self.middle).chain(self.residual)
    }
}

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `index` modulo 12.
    pub const fn from_index(index: u8) -> Branch {
        ALL_BRANCHES[(index % 12) as usize]
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Ja => "子",
            Self::Chuk => "丑",
            Self::In => "寅",
            Self::Myo => "卯",
            Self::Jin => "辰",
            Self::Sa => "巳",
            Self::O => "午",
            Self::Mi => "未",
            Self::Sin => "申",
            Self::Yu => "酉",
            Self::Sul => "戌",
            Self::Hae => "亥",
        }
    }

    /// Korean reading.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Ja => "자",
            Self::Chuk => "축",
            Self::In => "인",
            Self::Myo => "묘",
            Self::Jin => "진",
            Self::Sa => "사",
            Self::O => "오",
            Self::Mi => "미",
            Self::Sin => "신",
            Self::Yu => "유",
            Self::Sul => "술",
            Self::Hae => "해",
        }
    }

    /// Zodiac animal.
    pub const fn animal(self) -> &'static str {
        match self {
            Self::Ja => "Rat",
            Self::Chuk => "Ox",
            Self::In => "Tiger",
            Self::Myo => "Rabbit",
            Self::Jin => "Dragon",
            Self::Sa => "Snake",
            Self::O => "Horse",
            Self::Mi => "Goat",
            Self::Sin => "Monkey",
            Self::Yu => "Rooster",
            Self::Sul => "Dog",
            Self::Hae => "Pig",
        }
    }

    /// Element of the branch.
    pub const fn element(self) -> Element {
        match self {
            Self::In | Self::Myo => Element::Wood,
            Self::Sa | Self::O => Element::Fire,
            Self::Jin | Self::Sul | Self::Chuk | Self::Mi => Element::Earth,
            Self::Sin | Self::Yu => Element::Metal,
            Self::Hae | Self::Ja => Element::Water,
        }
    }

    /// Polarity by cycle position: even-indexed branches are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// Hidden stems, main stem first.
    pub const fn hidden_stems(self) -> HiddenStems {
        use Stem::*;
        let (main, middle, residual) = match self {
            Self::Ja => (Gye, None, None),
            Self::Chuk => (Gi, Some(Gye), Some(Sin)),
            Self::In => (Gap, Some(Byeong), Some(Mu)),
            Self::Myo => (Eul, None, None),
            Self::Jin => (Mu, Some(Eul), Some(Gye)),
            Self::Sa => (Byeong, Some(Gyeong), Some(Mu)),
            Self::O => (Jeong, Some(Gi), None),
            Self::Mi => (Gi, Some(Jeong), Some(Eul)),
            Self::Sin => (Gyeong, Some(Im), Some(Mu)),
            Self::Yu => (Sin, None, None),
            Self::Sul => (Mu, Some(Sin), Some(Jeong)),
            Self::Hae => (Im, Some(Gap), None),
        };
        HiddenStems {
            main,
            middle,
            residual,
        }
    }

    /// The canonical main hidden stem.
    pub const fn main_stem(self) -> Stem {
        self.hidden_stems().main
    }

    /// All 12 branches in order.
    pub const fn all() -> &'static [Branch; 12] {
        &ALL_BRANCHES
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    /// Accepts the hanja glyph or the Korean reading.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_BRANCHES
            .iter()
            .copied()
            .find(|b| b.hanja() == s || b.korean() == s)
            .ok_or_else(|| BaseError::UnknownBranch(s.to_string()))
    }
}

glyph_serde!(Branch);
