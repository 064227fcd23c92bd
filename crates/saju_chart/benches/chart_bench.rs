use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_chart::{BirthInput, ChartPayload, compute_chart, default_engine, verify_payload};
use saju_time::SolarTermTable;

fn chart_bench(c: &mut Criterion) {
    let timed = BirthInput::parse("1990-12-25", Some("09:15"), "male").expect("valid input");
    let untimed = BirthInput::parse("2024-02-04", None, "female").expect("valid input");
    // force the shared table before timing
    let _ = default_engine();

    let mut group = c.benchmark_group("chart");
    group.bench_function("compute_timed", |b| b.iter(|| compute_chart(black_box(&timed))));
    group.bench_function("compute_untimed", |b| b.iter(|| compute_chart(black_box(&untimed))));
    group.finish();
}

fn payload_bench(c: &mut Criterion) {
    let birth = BirthInput::parse("1990-12-25", Some("09:15"), "male").expect("valid input");
    let payload = compute_chart(&birth).payload();
    let json = payload.to_json().expect("serializable payload");

    let mut group = c.benchmark_group("payload");
    group.bench_function("verify", |b| b.iter(|| verify_payload(black_box(&payload))));
    group.bench_function("from_json", |b| {
        b.iter(|| ChartPayload::from_json(black_box(&json)))
    });
    group.finish();
}

fn table_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("solar_terms");
    group.sample_size(10);
    group.bench_function("computed_one_decade", |b| {
        b.iter(|| SolarTermTable::computed(black_box(2000..=2009)))
    });
    group.finish();
}

criterion_group!(benches, chart_bench, payload_bench, table_bench);
criterion_main!(benches);
