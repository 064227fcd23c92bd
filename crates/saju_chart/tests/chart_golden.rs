//! End-to-end charts through the default engine.

use saju_base::{Advisory, Gender, MarkerKind, Reliability, StemBranch, TenGod};
use saju_chart::{BirthInput, ChartEngine, compute_chart, yearly_progression};
use saju_config::EngineConfig;
use saju_time::{SolarTerm, SolarTermTable};

fn sb(s: &str) -> StemBranch {
    s.parse().unwrap()
}

fn birth(date: &str, time: Option<&str>, gender: &str) -> BirthInput {
    BirthInput::parse(date, time, gender).unwrap()
}

#[test]
fn christmas_1990_no_time_male() {
    let chart = compute_chart(&birth("1990-12-25", None, "male"));
    assert_eq!(chart.pillars.year, sb("庚午"));
    assert_eq!(chart.pillars.month, sb("戊子"));
    assert_eq!(chart.pillars.day, sb("甲子"));
    assert!(chart.pillars.hour.is_none());
    assert!(chart.ten_gods.hour_stem.is_none());
    assert!(chart.ten_gods.hour_branch.is_none());
    assert_eq!(chart.reliability, Reliability::NeedsReview);
    assert_eq!(chart.warnings, vec!["no birth time".to_string()]);
    assert_eq!(chart.advisories, vec![Advisory::NoBirthTime]);
    assert_eq!(chart.major_fortune.cycles[0].pillar, sb("己丑"));
    assert!((1..=10).contains(&chart.major_fortune.start_age));
}

#[test]
fn confirmed_when_nothing_is_ambiguous() {
    let chart = compute_chart(&birth("2000-06-15", Some("12:00"), "female"));
    assert_eq!(chart.reliability, Reliability::Confirmed);
    assert!(chart.warnings.is_empty());
    assert_eq!(chart.pillars.day, sb("甲辰"));
    assert_eq!(chart.pillars.month.branch.to_string(), "午");
    assert_eq!(chart.pillars.hour, Some(sb("庚午")));
}

#[test]
fn gap_day_in_horse_month_is_hurting_officer() {
    for date in ["1990-06-18", "2000-06-15"] {
        let a = compute_chart(&birth(date, Some("10:00"), "male"));
        let b = compute_chart(&birth(date, Some("10:00"), "male"));
        assert_eq!(a.pillars.day.stem.to_string(), "甲", "{date}");
        assert_eq!(a.pillars.month.branch.to_string(), "午", "{date}");
        assert_eq!(a.ten_gods.month_branch, TenGod::HurtingOfficer);
        assert_eq!(a, b);
    }
}

#[test]
fn near_ipchun_flags_boundary() {
    // 입춘 2024: 17:27 KST.
    let chart = compute_chart(&birth("2024-02-04", Some("17:00"), "male"));
    assert_eq!(chart.pillars.year, sb("癸卯"));
    assert_eq!(chart.reliability, Reliability::NeedsReview);
    let near = chart.advisories.iter().find_map(|a| match a {
        Advisory::NearSolarTermBoundary { term, minutes } => Some((*term, *minutes)),
        _ => None,
    });
    let (term, minutes) = near.expect("boundary advisory");
    assert_eq!(term, SolarTerm::Ipchun);
    assert!((-60..0).contains(&minutes), "minutes = {minutes}");
}

#[test]
fn mid_month_term_is_not_a_boundary() {
    // 춘분 2024 falls around noon KST on 20 March; no pillar changes there.
    let chart = compute_chart(&birth("2024-03-20", Some("12:04"), "male"));
    assert_eq!(chart.pillars.month.branch.to_string(), "卯");
    assert_eq!(chart.reliability, Reliability::Confirmed);
    assert!(chart.warnings.is_empty());
}

#[test]
fn unknown_time_names_term_later_that_day() {
    // 입춘 2024 at 17:27 KST: the year pillar depends on the missing time.
    let chart = compute_chart(&birth("2024-02-04", None, "female"));
    assert_eq!(chart.pillars.year, sb("癸卯"));
    assert_eq!(
        chart.advisories,
        vec![
            Advisory::NoBirthTime,
            Advisory::SolarTermOnBirthDate {
                term: SolarTerm::Ipchun
            },
        ]
    );
}

#[test]
fn unknown_time_reports_no_minute_offset() {
    // 백로 1993 begins a few minutes after midnight KST on 8 September.
    let chart = compute_chart(&birth("1993-09-08", None, "male"));
    assert!(chart.advisories.contains(&Advisory::SolarTermOnBirthDate {
        term: SolarTerm::Baengno
    }));
    assert!(
        !chart
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::NearSolarTermBoundary { .. }))
    );

    let eve = compute_chart(&birth("1993-09-07", None, "male"));
    assert_eq!(eve.advisories, vec![Advisory::NoBirthTime]);
}

#[test]
fn zero_tolerance_disables_boundary_check() {
    let config = EngineConfig {
        boundary_tolerance_minutes: 0,
        ..EngineConfig::default()
    };
    let engine = ChartEngine::new(config).unwrap();
    let chart = engine.compute_chart(&birth("2024-02-04", Some("17:00"), "male"));
    assert_eq!(chart.reliability, Reliability::Confirmed);
}

#[test]
fn summer_time_and_midnight() {
    let chart = compute_chart(&birth("1987-07-15", Some("23:40"), "female"));
    assert!(chart.advisories.contains(&Advisory::SummerTime { year: 1987 }));
    assert!(chart.advisories.contains(&Advisory::MidnightBranch));
    assert_eq!(chart.warnings.len(), chart.advisories.len());
}

#[test]
fn summer_time_check_can_be_disabled() {
    let config = EngineConfig {
        check_summer_time: false,
        ..EngineConfig::default()
    };
    let engine = ChartEngine::new(config).unwrap();
    let chart = engine.compute_chart(&birth("1987-07-15", Some("12:00"), "female"));
    assert_eq!(chart.reliability, Reliability::Confirmed);
}

#[test]
fn missing_table_degrades_everything_but_succeeds() {
    let engine = ChartEngine::with_table(EngineConfig::default(), SolarTermTable::empty()).unwrap();
    let chart = engine.compute_chart(&birth("1990-12-25", Some("08:00"), "female"));
    assert_eq!(chart.reliability, Reliability::NeedsReview);
    assert_eq!(chart.major_fortune.start_age, 6);
    let missing = chart
        .advisories
        .iter()
        .filter(|a| matches!(a, Advisory::MissingSolarTerms { .. }))
        .count();
    assert_eq!(missing, 3);
    // calendar fallbacks agree with the real answer for late December
    assert_eq!(chart.pillars.year, sb("庚午"));
    assert_eq!(chart.pillars.month, sb("戊子"));
}

#[test]
fn markers_and_interactions_of_christmas_1990() {
    let chart = compute_chart(&birth("1990-12-25", None, "male"));
    let kinds: Vec<MarkerKind> = chart.markers.kinds().collect();
    assert_eq!(kinds, vec![MarkerKind::Hongyeom, MarkerKind::Geupgak]);
    let set = chart.interactions();
    assert_eq!(set.clash_labels(), vec!["甲庚충", "子午충"]);
    // the first decade (己丑) binds with the day branch 子
    let overlay = chart.interactions_with(&[chart.major_fortune.cycles[0].pillar]);
    assert!(overlay.combination_labels().contains(&"甲己합土".to_string()));
    assert!(overlay.combination_labels().contains(&"子丑합土".to_string()));
}

#[test]
fn yearly_window_from_birth_date() {
    let b = birth("1990-12-25", None, "male");
    let window = yearly_progression(b.date, 2026);
    assert_eq!(window.len(), 21);
    let current: Vec<_> = window.iter().filter(|e| e.is_current).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].year, 2026);
    assert_eq!(current[0].age, 36);
    assert_eq!(current[0].pillar, sb("丙午"));
    assert_eq!(compute_chart(&b).yearly_progression(2026), window);
}

#[test]
fn gender_only_changes_fortune() {
    let m = compute_chart(&birth("1990-12-25", Some("09:15"), "male"));
    let f = compute_chart(&birth("1990-12-25", Some("09:15"), "female"));
    assert_eq!(m.pillars, f.pillars);
    assert_eq!(m.ten_gods, f.ten_gods);
    assert_eq!(m.markers, f.markers);
    assert_ne!(m.major_fortune.direction, f.major_fortune.direction);
    assert_eq!(f.birth.gender, Gender::Female);
}
