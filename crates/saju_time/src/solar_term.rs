//! The 24 solar terms (jeolgi).
//!
//! Each term is the instant the Sun's apparent ecliptic longitude reaches a
//! multiple of 15 deg. Twelve of them ("jeol", the boundary terms) open a
//! solar month; the other twelve ("gi") fall mid-month.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// The 24 solar terms in calendar-year order, starting from Sohan (Minor Cold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolarTerm {
    Sohan,
    Daehan,
    Ipchun,
    Usu,
    Gyeongchip,
    Chunbun,
    Cheongmyeong,
    Gogu,
    Ipha,
    Soman,
    Mangjong,
    Haji,
    Soseo,
    Daeseo,
    Ipchu,
    Cheoseo,
    Baengno,
    Chubun,
    Hallo,
    Sanggang,
    Ipdong,
    Soseol,
    Daeseol,
    Dongji,
}

/// All 24 solar terms in calendar-year order (0 = Sohan, 23 = Dongji).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Sohan,
    SolarTerm::Daehan,
    SolarTerm::Ipchun,
    SolarTerm::Usu,
    SolarTerm::Gyeongchip,
    SolarTerm::Chunbun,
    SolarTerm::Cheongmyeong,
    SolarTerm::Gogu,
    SolarTerm::Ipha,
    SolarTerm::Soman,
    SolarTerm::Mangjong,
    SolarTerm::Haji,
    SolarTerm::Soseo,
    SolarTerm::Daeseo,
    SolarTerm::Ipchu,
    SolarTerm::Cheoseo,
    SolarTerm::Baengno,
    SolarTerm::Chubun,
    SolarTerm::Hallo,
    SolarTerm::Sanggang,
    SolarTerm::Ipdong,
    SolarTerm::Soseol,
    SolarTerm::Daeseol,
    SolarTerm::Dongji,
];

/// The 12 boundary ("jeol") terms in calendar-year order.
pub const BOUNDARY_TERMS: [SolarTerm; 12] = [
    SolarTerm::Sohan,
    SolarTerm::Ipchun,
    SolarTerm::Gyeongchip,
    SolarTerm::Cheongmyeong,
    SolarTerm::Ipha,
    SolarTerm::Mangjong,
    SolarTerm::Soseo,
    SolarTerm::Ipchu,
    SolarTerm::Baengno,
    SolarTerm::Hallo,
    SolarTerm::Ipdong,
    SolarTerm::Daeseol,
];

impl SolarTerm {
    /// 0-based index in calendar-year order (Sohan=0 .. Dongji=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Apparent solar longitude at which the term begins, in degrees.
    pub const fn longitude_deg(self) -> f64 {
        // Sohan sits at 285 deg; each later term adds 15 deg.
        ((285 + 15 * self.index() as u32) % 360) as f64
    }

    /// Whether this term opens a solar month.
    pub const fn is_boundary(self) -> bool {
        self.index() % 2 == 0
    }

    /// Solar-month ordinal of the month this term opens or sits in,
    /// counted from the Tiger month (Ipchun = 0) through the Ox month (Sohan = 11).
    pub const fn month_ordinal(self) -> u8 {
        ((self.index() / 2) + 11) % 12
    }

    /// Korean name.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Sohan => "소한",
            Self::Daehan => "대한",
            Self::Ipchun => "입춘",
            Self::Usu => "우수",
            Self::Gyeongchip => "경칩",
            Self::Chunbun => "춘분",
            Self::Cheongmyeong => "청명",
            Self::Gogu => "곡우",
            Self::Ipha => "입하",
            Self::Soman => "소만",
            Self::Mangjong => "망종",
            Self::Haji => "하지",
            Self::Soseo => "소서",
            Self::Daeseo => "대서",
            Self::Ipchu => "입추",
            Self::Cheoseo => "처서",
            Self::Baengno => "백로",
            Self::Chubun => "추분",
            Self::Hallo => "한로",
            Self::Sanggang => "상강",
            Self::Ipdong => "입동",
            Self::Soseol => "소설",
            Self::Daeseol => "대설",
            Self::Dongji => "동지",
        }
    }

    /// Hanja name.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Sohan => "小寒",
            Self::Daehan => "大寒",
            Self::Ipchun => "立春",
            Self::Usu => "雨水",
            Self::Gyeongchip => "驚蟄",
            Self::Chunbun => "春分",
            Self::Cheongmyeong => "淸明",
            Self::Gogu => "穀雨",
            Self::Ipha => "立夏",
            Self::Soman => "小滿",
            Self::Mangjong => "芒種",
            Self::Haji => "夏至",
            Self::Soseo => "小暑",
            Self::Daeseo => "大暑",
            Self::Ipchu => "立秋",
            Self::Cheoseo => "處暑",
            Self::Baengno => "白露",
            Self::Chubun => "秋分",
            Self::Hallo => "寒露",
            Self::Sanggang => "霜降",
            Self::Ipdong => "立冬",
            Self::Soseol => "小雪",
            Self::Daeseol => "大雪",
            Self::Dongji => "冬至",
        }
    }

    /// English name.
    pub const fn english(self) -> &'static str {
        match self {
            Self::Sohan => "Minor Cold",
            Self::Daehan => "Major Cold",
            Self::Ipchun => "Start of Spring",
            Self::Usu => "Rain Water",
            Self::Gyeongchip => "Awakening of Insects",
            Self::Chunbun => "Spring Equinox",
            Self::Cheongmyeong => "Pure Brightness",
            Self::Gogu => "Grain Rain",
            Self::Ipha => "Start of Summer",
            Self::Soman => "Grain Buds",
            Self::Mangjong => "Grain in Ear",
            Self::Haji => "Summer Solstice",
            Self::Soseo => "Minor Heat",
            Self::Daeseo => "Major Heat",
            Self::Ipchu => "Start of Autumn",
            Self::Cheoseo => "End of Heat",
            Self::Baengno => "White Dew",
            Self::Chubun => "Autumn Equinox",
            Self::Hallo => "Cold Dew",
            Self::Sanggang => "Frost's Descent",
            Self::Ipdong => "Start of Winter",
            Self::Soseol => "Minor Snow",
            Self::Daeseol => "Major Snow",
            Self::Dongji => "Winter Solstice",
        }
    }

    /// All 24 terms in order.
    pub const fn all() -> &'static [SolarTerm; 24] {
        &ALL_SOLAR_TERMS
    }
}

impl Display for SolarTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.korean(), self.english())
    }
}

impl FromStr for SolarTerm {
    type Err = TimeError;

    /// Accepts the Korean name, the hanja name, the kebab-case id or the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_SOLAR_TERMS
            .iter()
            .copied()
            .find(|t| {
                t.korean() == s
                    || t.hanja() == s
                    || t.english().eq_ignore_ascii_case(s)
                    || format!("{t:?}").eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| TimeError::UnknownSolarTerm(s.to_string()))
    }
}
