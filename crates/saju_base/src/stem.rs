//! The ten heavenly stems (cheongan).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::element::{Element, Polarity};
use crate::error::BaseError;
use crate::util::glyph_serde;

/// The 10 heavenly stems in cycle order, starting from Gap (甲).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in order (0 = 甲, 9 = 癸).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `index` modulo 10.
    pub const fn from_index(index: u8) -> Stem {
        ALL_STEMS[(index % 10) as usize]
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Gap => "甲",
            Self::Eul => "乙",
            Self::Byeong => "丙",
            Self::Jeong => "丁",
            Self::Mu => "戊",
            Self::Gi => "己",
            Self::Gyeong => "庚",
            Self::Sin => "辛",
            Self::Im => "壬",
            Self::Gye => "癸",
        }
    }

    /// Korean reading.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Gap => "갑",
            Self::Eul => "을",
            Self::Byeong => "병",
            Self::Jeong => "정",
            Self::Mu => "무",
            Self::Gi => "기",
            Self::Gyeong => "경",
            Self::Sin => "신",
            Self::Im => "임",
            Self::Gye => "계",
        }
    }

    /// Element: pairs of stems share one, in generation order.
    pub const fn element(self) -> Element {
        match self {
            Self::Gap | Self::Eul => Element::Wood,
            Self::Byeong | Self::Jeong => Element::Fire,
            Self::Mu | Self::Gi => Element::Earth,
            Self::Gyeong | Self::Sin => Element::Metal,
            Self::Im | Self::Gye => Element::Water,
        }
    }

    /// Even-indexed stems are yang, odd-indexed are yin.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// All 10 stems in order.
    pub const fn all() -> &'static [Stem; 10] {
        &ALL_STEMS
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

impl FromStr for Stem {
    type Err = BaseError;

    /// Accepts the hanja glyph or the Korean reading.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_STEMS
            .iter()
            .copied()
            .find(|st| st.hanja() == s || st.korean() == s)
            .ok_or_else(|| BaseError::UnknownStem(s.to_string()))
    }
}

glyph_serde!(Stem);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_stems_count() {
        assert_eq!(ALL_STEMS.len(), 10);
    }

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(Stem::from_index(i as u8), *s);
        }
    }

    #[test]
    fn element_and_polarity_total() {
        let yang: Vec<_> = ALL_STEMS.iter().filter(|s| s.polarity().is_yang()).collect();
        assert_eq!(yang, vec![&Stem::Gap, &Stem::Byeong, &Stem::Mu, &Stem::Gyeong, &Stem::Im]);
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Jeong.element(), Element::Fire);
        assert_eq!(Stem::Gi.element(), Element::Earth);
        assert_eq!(Stem::Sin.element(), Element::Metal);
        assert_eq!(Stem::Gye.element(), Element::Water);
    }

    #[test]
    fn parse_glyph_and_reading() {
        for s in ALL_STEMS {
            assert_eq!(s.hanja().parse::<Stem>().unwrap(), s);
            assert_eq!(s.korean().parse::<Stem>().unwrap(), s);
        }
        assert!("子".parse::<Stem>().is_err());
    }
}
