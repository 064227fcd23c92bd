//! Civil birth moments: a local calendar date, an optional clock time and
//! the fixed UTC offset the clock was read in.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// Korea Standard Time offset in minutes, the default civil clock.
pub const KST_OFFSET_MINUTES: i32 = 9 * 60;

/// Wall-clock time of birth with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Build a clock time, rejecting hours > 23 or minutes > 59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 {
            return Err(TimeError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// Hour of day (0-23).
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// Minute of hour (0-59).
    pub const fn minute(self) -> u32 {
        self.minute
    }

    fn as_naive(self) -> NaiveTime {
        // Range already validated in `new`.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Accepts `HH:MM` or the compact `HHMM` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || TimeError::InvalidTime(s.to_string());
        let (h, m) = match s.split_once(':') {
            Some((h, m)) => (h, m),
            None if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) => s.split_at(2),
            None => return Err(invalid()),
        };
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a birth date: `YYYY-MM-DD`, or the 6-digit `YYMMDD` shorthand
/// (YY < 50 means 20YY, otherwise 19YY).
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    let s = s.trim();
    let invalid = || TimeError::InvalidDate(s.to_string());
    if s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()) {
        let yy: i32 = s[0..2].parse().map_err(|_| invalid())?;
        let month: u32 = s[2..4].parse().map_err(|_| invalid())?;
        let day: u32 = s[4..6].parse().map_err(|_| invalid())?;
        let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())
}

/// Fixed offset from a minute count east of UTC.
pub fn utc_offset_from_minutes(minutes: i32) -> Result<FixedOffset, TimeError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(TimeError::InvalidUtcOffset(minutes))
}

/// A birth moment on a civil clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilMoment {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Local clock time, if known.
    pub time: Option<ClockTime>,
    /// Offset of the civil clock from UTC.
    pub utc_offset: FixedOffset,
}

impl CivilMoment {
    pub fn new(date: NaiveDate, time: Option<ClockTime>, utc_offset: FixedOffset) -> Self {
        Self {
            date,
            time,
            utc_offset,
        }
    }

    /// Local date-time; unknown times resolve to local midnight.
    pub fn local(&self) -> NaiveDateTime {
        let time = self.time.map(ClockTime::as_naive).unwrap_or(NaiveTime::MIN);
        self.date.and_time(time)
    }

    /// The UTC instant of this moment.
    pub fn instant(&self) -> DateTime<Utc> {
        let offset = TimeDelta::seconds(i64::from(self.utc_offset.local_minus_utc()));
        (self.local() - offset).and_utc()
    }

    /// Local calendar year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Local calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Local day of month (1-31).
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Whether a clock time was supplied.
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kst() -> FixedOffset {
        utc_offset_from_minutes(KST_OFFSET_MINUTES).unwrap()
    }

    #[test]
    fn clock_time_forms() {
        assert_eq!("09:30".parse::<ClockTime>().unwrap(), ClockTime::new(9, 30).unwrap());
        assert_eq!("2315".parse::<ClockTime>().unwrap(), ClockTime::new(23, 15).unwrap());
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert_eq!(ClockTime::new(7, 5).unwrap().to_string(), "07:05");
    }

    #[test]
    fn date_forms() {
        assert_eq!(parse_date("1990-12-25").unwrap(), NaiveDate::from_ymd_opt(1990, 12, 25).unwrap());
        assert_eq!(parse_date("901225").unwrap(), NaiveDate::from_ymd_opt(1990, 12, 25).unwrap());
        assert_eq!(parse_date("040229").unwrap(), NaiveDate::from_ymd_opt(2004, 2, 29).unwrap());
        assert!(parse_date("050229").is_err());
        assert!(parse_date("1990/12/25").is_err());
    }

    #[test]
    fn instant_applies_offset() {
        let m = CivilMoment::new(
            NaiveDate::from_ymd_opt(2024, 2, 4).unwrap(),
            Some(ClockTime::new(17, 27).unwrap()),
            kst(),
        );
        assert_eq!(m.instant(), Utc.with_ymd_and_hms(2024, 2, 4, 8, 27, 0).unwrap());
    }

    #[test]
    fn unknown_time_is_local_midnight() {
        let m = CivilMoment::new(NaiveDate::from_ymd_opt(1990, 12, 25).unwrap(), None, kst());
        assert_eq!(m.instant(), Utc.with_ymd_and_hms(1990, 12, 24, 15, 0, 0).unwrap());
        assert!(!m.has_time());
    }

    #[test]
    fn offset_bounds() {
        assert!(utc_offset_from_minutes(14 * 60).is_ok());
        assert!(utc_offset_from_minutes(25 * 60).is_err());
    }
}
