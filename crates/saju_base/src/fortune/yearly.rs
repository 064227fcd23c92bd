//! Yearly fortune (세운): the year pillars around a reference year.

use serde::{Deserialize, Serialize};

use crate::sexagenary::{StemBranch, year_stem_branch};

/// Years listed on each side of the reference year.
pub const YEARLY_WINDOW_RADIUS: i32 = 10;

/// One calendar year of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearlyEntry {
    pub year: i32,
    pub pillar: StemBranch,
    /// `year − birth_year`; negative for years before the birth.
    pub age: i32,
    pub is_current: bool,
}

/// The 21 years `window_year − 10 ..= window_year + 10` with ages from `birth_year`.
///
/// Pillars use the plain calendar year; ages are whole calendar-year differences.
pub fn yearly_progression(birth_year: i32, window_year: i32) -> Vec<YearlyEntry> {
    (window_year - YEARLY_WINDOW_RADIUS..=window_year + YEARLY_WINDOW_RADIUS)
        .map(|year| YearlyEntry {
            year,
            pillar: year_stem_branch(year),
            age: year - birth_year,
            is_current: year == window_year,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_shape() {
        let got = yearly_progression(1990, 2025);
        assert_eq!(got.len(), 21);
        assert_eq!(got.first().map(|e| e.year), Some(2015));
        assert_eq!(got.last().map(|e| e.year), Some(2035));
        assert_eq!(got.iter().filter(|e| e.is_current).count(), 1);
        assert_eq!(got[10].age, 35);
        assert_eq!(got[10].pillar.to_string(), "乙巳");
    }

    #[test]
    fn ages_before_birth_are_negative() {
        let got = yearly_progression(2020, 2015);
        assert_eq!(got[0].age, -15);
    }
}
