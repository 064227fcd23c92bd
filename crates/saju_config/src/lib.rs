//! Configuration for the chart engine.
//!
//! Load order: built-in defaults, then a TOML file, then `SAJU_*`
//! environment variables. Command-line flags are applied last by the caller.
//!
//! ```toml
//! utc_offset_minutes = 540
//! boundary_tolerance_minutes = 60
//! check_summer_time = true
//!
//! [solar_terms]
//! first_year = 1900
//! last_year = 2100
//! file = "kasi-terms.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use saju_time::{DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, KST_OFFSET_MINUTES};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod error;

pub use error::ConfigError;

pub const ENV_UTC_OFFSET: &str = "SAJU_UTC_OFFSET_MINUTES";
pub const ENV_TOLERANCE: &str = "SAJU_BOUNDARY_TOLERANCE_MINUTES";
pub const ENV_CHECK_SUMMER_TIME: &str = "SAJU_CHECK_SUMMER_TIME";
pub const ENV_SOLAR_TERMS_FILE: &str = "SAJU_SOLAR_TERMS_FILE";

/// Largest accepted civil-clock offset (±14 h).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Largest accepted boundary tolerance (24 h).
pub const MAX_TOLERANCE_MINUTES: u32 = 24 * 60;

/// Default distance from a solar term that flags a chart for review.
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 60;

/// Widest year span the computed solar-term table may cover.
pub const MAX_SOLAR_TERM_SPAN_YEARS: i32 = 1000;

/// Range and source of the solar-term table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarTermsConfig {
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_last_year")]
    pub last_year: i32,
    /// JSON file of official term instants overriding computed years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_first_year() -> i32 {
    DEFAULT_FIRST_YEAR
}

fn default_last_year() -> i32 {
    DEFAULT_LAST_YEAR
}

impl Default for SolarTermsConfig {
    fn default() -> Self {
        Self {
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
            file: None,
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Offset of the civil clock birth times are recorded in (minutes east of UTC).
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
    /// Births closer than this to a solar term are flagged for review.
    #[serde(default = "default_tolerance")]
    pub boundary_tolerance_minutes: u32,
    /// Flag births inside historical daylight-saving periods.
    #[serde(default = "default_true")]
    pub check_summer_time: bool,
    #[serde(default)]
    pub solar_terms: SolarTermsConfig,
}

fn default_utc_offset() -> i32 {
    KST_OFFSET_MINUTES
}

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE_MINUTES
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: KST_OFFSET_MINUTES,
            boundary_tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            check_summer_time: true,
            solar_terms: SolarTermsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write as pretty TOML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply overrides from a variable lookup (`SAJU_*` names).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_err = |var: &str, value: &str| ConfigError::Env {
            var: var.to_string(),
            value: value.to_string(),
        };
        if let Some(v) = lookup(ENV_UTC_OFFSET) {
            self.utc_offset_minutes = v.trim().parse().map_err(|_| env_err(ENV_UTC_OFFSET, &v))?;
        }
        if let Some(v) = lookup(ENV_TOLERANCE) {
            self.boundary_tolerance_minutes =
                v.trim().parse().map_err(|_| env_err(ENV_TOLERANCE, &v))?;
        }
        if let Some(v) = lookup(ENV_CHECK_SUMMER_TIME) {
            self.check_summer_time = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(env_err(ENV_CHECK_SUMMER_TIME, &v)),
            };
        }
        if let Some(v) = lookup(ENV_SOLAR_TERMS_FILE) {
            let v = v.trim();
            self.solar_terms.file = (!v.is_empty()).then(|| PathBuf::from(v));
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Defaults, then `path` if given, then the environment; validated.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes {} outside ±{MAX_UTC_OFFSET_MINUTES}",
                self.utc_offset_minutes
            )));
        }
        if self.boundary_tolerance_minutes > MAX_TOLERANCE_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "boundary_tolerance_minutes {} exceeds {MAX_TOLERANCE_MINUTES}",
                self.boundary_tolerance_minutes
            )));
        }
        if self.solar_terms.first_year > self.solar_terms.last_year {
            return Err(ConfigError::Invalid(format!(
                "solar_terms.first_year {} after last_year {}",
                self.solar_terms.first_year, self.solar_terms.last_year
            )));
        }
        let span = i64::from(self.solar_terms.last_year) - i64::from(self.solar_terms.first_year);
        if span >= i64::from(MAX_SOLAR_TERM_SPAN_YEARS) {
            return Err(ConfigError::Invalid(format!(
                "solar_terms range {}..={} spans more than {MAX_SOLAR_TERM_SPAN_YEARS} years",
                self.solar_terms.first_year, self.solar_terms.last_year
            )));
        }
        Ok(())
    }
}
