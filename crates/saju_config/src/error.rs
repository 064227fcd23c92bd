//! Error types for configuration loading.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from reading, parsing or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read or written.
    Io(String),
    /// The file is not valid TOML for the config schema.
    Parse(String),
    /// An environment variable held an unparseable value.
    Env { var: String, value: String },
    /// A value is outside its allowed range.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Env { var, value } => write!(f, "invalid value for {var}: {value:?}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
