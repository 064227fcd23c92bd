//! The five elements (ohaeng) and yin/yang polarity.
//!
//! Generation cycle: Wood → Fire → Earth → Metal → Water → Wood.
//! Restraint cycle: Wood → Earth → Water → Fire → Metal → Wood.

use serde::{Deserialize, Serialize};

/// One of the five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generation order.
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based index in generation order (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The element this one generates.
    pub const fn generates(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 1) % 5]
    }

    /// The element this one restrains.
    pub const fn restrains(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 2) % 5]
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// Korean reading.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Wood => "목",
            Self::Fire => "화",
            Self::Earth => "토",
            Self::Metal => "금",
            Self::Water => "수",
        }
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }
}

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Korean reading (양 / 음).
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Yang => "양",
            Self::Yin => "음",
        }
    }

    pub const fn is_yang(self) -> bool {
        matches!(self, Self::Yang)
    }
}
