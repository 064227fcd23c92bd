//! Historical Korean daylight-saving periods.
//!
//! Births inside these windows were recorded on a clock one hour ahead of
//! standard time; the engine flags them rather than correcting.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One daylight-saving period, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummerTimePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SummerTimePeriod {
    /// Whether `date` falls inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// (year, start month, start day, end month, end day)
const KOREAN_SUMMER_TIME: [(i32, u32, u32, u32, u32); 12] = [
    (1948, 6, 1, 9, 12),
    (1949, 4, 3, 9, 10),
    (1950, 4, 1, 9, 9),
    (1951, 5, 6, 9, 8),
    (1955, 5, 5, 9, 8),
    (1956, 5, 20, 9, 29),
    (1957, 5, 5, 9, 21),
    (1958, 5, 4, 9, 20),
    (1959, 5, 3, 9, 19),
    (1960, 5, 1, 9, 17),
    (1987, 5, 10, 10, 11),
    (1988, 5, 8, 10, 9),
];

/// All recorded Korean daylight-saving periods.
pub fn korean_summer_time_periods() -> impl Iterator<Item = SummerTimePeriod> {
    KOREAN_SUMMER_TIME.iter().filter_map(|&(y, sm, sd, em, ed)| {
        Some(SummerTimePeriod {
            start: NaiveDate::from_ymd_opt(y, sm, sd)?,
            end: NaiveDate::from_ymd_opt(y, em, ed)?,
        })
    })
}

/// The daylight-saving period containing `date`, if any.
pub fn summer_time_period(date: NaiveDate) -> Option<SummerTimePeriod> {
    korean_summer_time_periods()
        .filter(|p| p.start.year() == date.year())
        .find(|p| p.contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn table_complete() {
        assert_eq!(korean_summer_time_periods().count(), 12);
    }

    #[test]
    fn inside_and_edges() {
        assert!(summer_time_period(d(1987, 7, 1)).is_some());
        assert!(summer_time_period(d(1987, 5, 10)).is_some());
        assert!(summer_time_period(d(1987, 10, 11)).is_some());
        assert!(summer_time_period(d(1987, 10, 12)).is_none());
        assert!(summer_time_period(d(1988, 5, 7)).is_none());
    }

    #[test]
    fn years_without_summer_time() {
        assert!(summer_time_period(d(1952, 7, 1)).is_none());
        assert!(summer_time_period(d(1990, 7, 1)).is_none());
    }
}
