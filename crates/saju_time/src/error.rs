//! Error types for civil-time parsing and solar-term data loading.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from date/time parsing or solar-term table loading.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Birth date string could not be parsed.
    InvalidDate(String),
    /// Clock time string could not be parsed (expects `HH:MM` or `HHMM`).
    InvalidTime(String),
    /// UTC offset outside the representable range.
    InvalidUtcOffset(i32),
    /// Unknown solar-term name in a data file.
    UnknownSolarTerm(String),
    /// Solar-term data file could not be parsed.
    SolarTermParse(String),
    /// I/O error.
    Io(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(s) => write!(f, "invalid date: {s}"),
            Self::InvalidTime(s) => write!(f, "invalid time (expected HH:MM): {s}"),
            Self::InvalidUtcOffset(m) => write!(f, "UTC offset out of range: {m} minutes"),
            Self::UnknownSolarTerm(s) => write!(f, "unknown solar term: {s}"),
            Self::SolarTermParse(msg) => write!(f, "solar-term data parse error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl Error for TimeError {}

impl From<std::io::Error> for TimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TimeError {
    fn from(e: serde_json::Error) -> Self {
        Self::SolarTermParse(e.to_string())
    }
}
