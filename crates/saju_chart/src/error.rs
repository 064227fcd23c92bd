//! Error types for chart input and payload handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

use saju_base::BaseError;
use saju_config::ConfigError;
use saju_time::TimeError;

/// Errors at the chart engine's input boundaries.
///
/// Chart computation itself never fails; these only arise while parsing
/// birth input, loading reference data or reading stored payloads.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// Date, time, offset or solar-term data problem.
    Time(TimeError),
    /// Unknown token (stem, branch, gender, ...).
    Base(BaseError),
    /// Invalid engine configuration.
    Config(ConfigError),
    /// A stored payload could not be parsed.
    Payload(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "{e}"),
            Self::Base(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Payload(msg) => write!(f, "payload error: {msg}"),
        }
    }
}

impl Error for ChartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            Self::Base(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Payload(_) => None,
        }
    }
}

impl From<TimeError> for ChartError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<BaseError> for ChartError {
    fn from(e: BaseError) -> Self {
        Self::Base(e)
    }
}

impl From<ConfigError> for ChartError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e.to_string())
    }
}
