use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use zoned_time::{
    civil_to_utc, next_transition_after, transitions_for_year, utc_to_civil, CivilTime,
};

fn conversion(c: &mut Criterion) {
    let instant = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
    let normal = CivilTime::new(2024, 7, 15, 13, 0, 0).unwrap();
    let gap = CivilTime::new(2024, 3, 31, 1, 30, 0).unwrap();
    let ambiguous = CivilTime::new(2024, 10, 27, 1, 30, 0).unwrap();

    c.bench_function("utc_to_civil", |b| {
        b.iter(|| utc_to_civil(black_box(instant), "Europe/London"))
    });

    c.bench_function("civil_to_utc normal", |b| {
        b.iter(|| civil_to_utc(black_box(&normal), "Europe/London"))
    });

    c.bench_function("civil_to_utc gap", |b| {
        b.iter(|| civil_to_utc(black_box(&gap), "Europe/London"))
    });

    c.bench_function("civil_to_utc ambiguous", |b| {
        b.iter(|| civil_to_utc(black_box(&ambiguous), "Europe/London"))
    });
}

fn transitions(c: &mut Criterion) {
    let instant = Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap();

    c.bench_function("transitions_for_year", |b| {
        b.iter(|| transitions_for_year(black_box(2024), "America/New_York"))
    });

    c.bench_function("next_transition_after", |b| {
        b.iter(|| next_transition_after(black_box(instant), "Australia/Sydney"))
    });
}

criterion_group!(benches, conversion, transitions);
criterion_main!(benches);
