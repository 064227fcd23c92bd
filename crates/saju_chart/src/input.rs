//! Birth input as recorded on a person record.

use chrono::NaiveDate;
use saju_base::Gender;
use saju_time::{ClockTime, parse_date};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Birth date, optional clock time and gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthInput {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<ClockTime>,
    pub gender: Gender,
}

impl BirthInput {
    pub fn new(date: NaiveDate, time: Option<ClockTime>, gender: Gender) -> Self {
        Self { date, time, gender }
    }

    /// Parse textual input: `YYYY-MM-DD` (or `YYMMDD`), optional `HH:MM`, `male`/`female`.
    ///
    /// An empty time string counts as unknown.
    pub fn parse(date: &str, time: Option<&str>, gender: &str) -> Result<Self, ChartError> {
        let date = parse_date(date)?;
        let time = match time.map(str::trim) {
            Some(t) if !t.is_empty() => Some(t.parse::<ClockTime>()?),
            _ => None,
        };
        let gender: Gender = gender.parse()?;
        Ok(Self { date, time, gender })
    }
}
