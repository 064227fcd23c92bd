//! Payload round trips and drift detection.

use saju_base::{MarkerKind, StemBranch};
use saju_chart::{
    BirthInput, ChartPayload, PayloadSection, compare_payload_json, compare_payloads, compute_chart,
    verify_payload,
};

fn payload(date: &str, time: Option<&str>, gender: &str) -> ChartPayload {
    compute_chart(&BirthInput::parse(date, time, gender).unwrap()).payload()
}

#[test]
fn independent_computations_are_equal() {
    let a = payload("1984-02-05", Some("10:00"), "female");
    let b = payload("1984-02-05", Some("10:00"), "female");
    assert!(compare_payloads(&a, &b).is_empty());
    assert_eq!(a, b);
}

#[test]
fn json_round_trip_is_lossless() {
    let a = payload("1990-12-25", None, "male");
    let json = a.to_json().unwrap();
    let back = ChartPayload::from_json(&json).unwrap();
    assert_eq!(back, a);
    assert!(compare_payload_json(&json, &json).unwrap().is_empty());
    assert!(verify_payload(&back).is_empty());
}

#[test]
fn marker_order_in_stored_json_is_irrelevant() {
    let a = payload("1990-12-25", None, "male");
    assert!(a.markers.len() >= 2);
    let mut value = serde_json::to_value(&a).unwrap();
    value["markers"].as_array_mut().unwrap().reverse();
    let reordered = serde_json::to_string(&value).unwrap();
    let stored = a.to_json().unwrap();
    assert!(compare_payload_json(&stored, &reordered).unwrap().is_empty());
}

#[test]
fn tampered_sections_are_reported() {
    let fresh = payload("1990-12-25", Some("09:15"), "male");
    let mut stored = fresh.clone();
    stored.pillars.month = "甲子".parse::<StemBranch>().unwrap();
    stored.fortune_start_age += 1;
    let drift = verify_payload(&stored);
    assert!(drift.contains(PayloadSection::Pillars));
    assert!(drift.contains(PayloadSection::FortuneStartAge));
    assert!(!drift.contains(PayloadSection::Markers));
    assert_eq!(drift.to_string(), "drift in pillars, fortune-start-age");
}

#[test]
fn different_births_differ_in_birth_section() {
    let a = payload("1990-12-25", None, "male");
    let b = payload("1990-12-26", None, "male");
    let drift = compare_payloads(&a, &b);
    assert!(drift.contains(PayloadSection::Birth));
    assert!(drift.contains(PayloadSection::Pillars));
}

#[test]
fn stored_marker_shape() {
    let a = payload("1990-12-25", None, "male");
    let value = serde_json::to_value(&a).unwrap();
    let first = &value["markers"][0];
    assert_eq!(first["id"], "hongyeom");
    assert_eq!(first["positions"][0], "year");
    assert_eq!(first["count"], 1);
    assert!(a.markers.contains(MarkerKind::Geupgak));
}

#[test]
fn malformed_json_is_a_payload_error() {
    assert!(compare_payload_json("{", "{}").is_err());
}
