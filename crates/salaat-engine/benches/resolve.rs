use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use salaat_engine::error::Result;
use salaat_engine::{
    resolve_next, ExtendedWindow, Location, RawTimes, ResolveOptions, Rounding, WindowOptions,
};

// Fixed offsets in minutes from UTC midnight, roughly a mid-latitude summer day.
const MINUTES: [i64; 10] = [358, 368, 407, 811, 1070, 1142, 1266, 1276, 1522, 1712];

fn engine(date: NaiveDate, _loc: &Location, _rounding: Rounding) -> Result<RawTimes> {
    let base = date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default();
    Ok(MINUTES.map(|m| base + m * 60))
}

fn bench_window(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2020, 8, 9).unwrap();
    let loc = Location::new(42.5112, -83.3466, 0.0);

    c.bench_function("window_both_neighbours", |b| {
        b.iter(|| {
            ExtendedWindow::build(
                &engine,
                black_box(date),
                black_box(&loc),
                WindowOptions::both(),
            )
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let loc = Location::new(42.5112, -83.3466, 0.0);
    let utc = ResolveOptions::default().with_timezone("UTC").unwrap();
    let detroit = ResolveOptions::default()
        .with_timezone("America/Detroit")
        .unwrap();
    let reference = Utc.with_ymd_and_hms(2020, 8, 9, 20, 0, 0).unwrap();

    c.bench_function("resolve_next_utc", |b| {
        b.iter(|| resolve_next(&engine, black_box(reference), &loc, &utc))
    });

    c.bench_function("resolve_next_detroit", |b| {
        b.iter(|| resolve_next(&engine, black_box(reference), &loc, &detroit))
    });
}

criterion_group!(benches, bench_window, bench_resolve);
criterion_main!(benches);
