//! Config loading from TOML files and environment-style overrides.

use std::collections::HashMap;
use std::path::PathBuf;

use saju_config::{
    ConfigError, ENV_CHECK_SUMMER_TIME, ENV_SOLAR_TERMS_FILE, ENV_TOLERANCE, ENV_UTC_OFFSET,
    EngineConfig, MAX_SOLAR_TERM_SPAN_YEARS,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("saju_config_{}_{name}", std::process::id()))
}

#[test]
fn partial_toml_keeps_defaults() {
    let c = EngineConfig::from_toml_str(
        r#"
        boundary_tolerance_minutes = 30

        [solar_terms]
        last_year = 2050
        "#,
    )
    .unwrap();
    assert_eq!(c.boundary_tolerance_minutes, 30);
    assert_eq!(c.utc_offset_minutes, 540);
    assert_eq!(c.solar_terms.first_year, 1900);
    assert_eq!(c.solar_terms.last_year, 2050);
    assert!(c.solar_terms.file.is_none());
}

#[test]
fn bad_toml_is_parse_error() {
    let err = EngineConfig::from_toml_str("utc_offset_minutes = \"nine\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn overrides_apply_on_top() {
    let mut c = EngineConfig::default();
    c.apply_overrides(lookup(&[
        (ENV_UTC_OFFSET, "480"),
        (ENV_TOLERANCE, " 90 "),
        (ENV_CHECK_SUMMER_TIME, "off"),
        (ENV_SOLAR_TERMS_FILE, "/data/terms.json"),
    ]))
    .unwrap();
    assert_eq!(c.utc_offset_minutes, 480);
    assert_eq!(c.boundary_tolerance_minutes, 90);
    assert!(!c.check_summer_time);
    assert_eq!(c.solar_terms.file, Some(PathBuf::from("/data/terms.json")));
}

#[test]
fn bad_override_names_variable() {
    let mut c = EngineConfig::default();
    let err = c
        .apply_overrides(lookup(&[(ENV_CHECK_SUMMER_TIME, "maybe")]))
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::Env {
            var: ENV_CHECK_SUMMER_TIME.to_string(),
            value: "maybe".to_string()
        }
    );
}

#[test]
fn save_then_load() {
    let path = temp_path("round.toml");
    let mut c = EngineConfig::default();
    c.utc_offset_minutes = 510;
    c.solar_terms.file = Some(PathBuf::from("terms.json"));
    c.save(&path).unwrap();
    let back = EngineConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(back, c);
}

#[test]
fn missing_file_is_io_error() {
    let err = EngineConfig::load(temp_path("does_not_exist.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn oversized_solar_term_range_is_rejected() {
    let c = EngineConfig::from_toml_str("[solar_terms]\nfirst_year = 1900\nlast_year = 100000\n").unwrap();
    assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));

    let mut c = EngineConfig::default();
    c.solar_terms.first_year = 1500;
    c.solar_terms.last_year = 1500 + MAX_SOLAR_TERM_SPAN_YEARS - 1;
    assert!(c.validate().is_ok());
    c.solar_terms.last_year += 1;
    assert!(c.validate().is_err());
}
