use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_base::{
    ALL_BRANCHES, ALL_STEMS, FourPillars, StemBranch, TenGodsChart, day_stem_branch, detect_markers,
    interactions, ten_god, year_stem_branch,
};

fn sample_chart() -> FourPillars {
    FourPillars {
        year: "庚午".parse().expect("valid pillar"),
        month: "戊子".parse().expect("valid pillar"),
        day: "甲子".parse().expect("valid pillar"),
        hour: Some("丙子".parse().expect("valid pillar")),
    }
}

fn sexagenary_bench(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(1990, 12, 25).expect("valid date");

    let mut group = c.benchmark_group("sexagenary");
    group.bench_function("year_stem_branch", |b| b.iter(|| year_stem_branch(black_box(1990))));
    group.bench_function("day_stem_branch", |b| b.iter(|| day_stem_branch(black_box(date))));
    group.bench_function("cycle_round_trip", |b| {
        b.iter(|| StemBranch::from_cycle_index(black_box(37)).cycle_index())
    });
    group.finish();
}

fn ten_gods_bench(c: &mut Criterion) {
    let chart = sample_chart();

    let mut group = c.benchmark_group("ten_gods");
    group.bench_function("stem_grid_100", |b| {
        b.iter(|| {
            for d in ALL_STEMS {
                for t in ALL_STEMS {
                    black_box(ten_god(d, t));
                }
            }
        })
    });
    group.bench_function("chart", |b| b.iter(|| TenGodsChart::from_pillars(black_box(&chart))));
    group.finish();
}

fn markers_bench(c: &mut Criterion) {
    let slots = sample_chart().slots();

    let mut group = c.benchmark_group("markers");
    group.bench_function("detect_markers", |b| b.iter(|| detect_markers(black_box(&slots))));
    group.finish();
}

fn interactions_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("interactions");
    group.bench_function("all_tokens", |b| {
        b.iter(|| interactions(black_box(&ALL_STEMS), black_box(&ALL_BRANCHES)))
    });
    group.finish();
}

criterion_group!(
    benches,
    sexagenary_bench,
    ten_gods_bench,
    markers_bench,
    interactions_bench
);
criterion_main!(benches);
