//! Criterion benchmarks for the derived-series hot path.
//!
//! Benchmarks:
//! 1. Single indicators (SMA, daily return, rolling volatility)
//! 2. The full derived series computed for the Historical Data sheet

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stockreport_core::data::synthetic_bars;
use stockreport_core::derived::DerivedSeries;
use stockreport_core::indicators::{DailyReturn, Indicator, RollingVolatility, Sma};

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_compute");
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();

    for &bar_count in &[252, 1260, 2520] {
        let bars = synthetic_bars(start, bar_count);

        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(200)),
            Box::new(DailyReturn::new()),
            Box::new(RollingVolatility::new(20)),
        ];
        for indicator in &indicators {
            group.bench_with_input(
                BenchmarkId::new(indicator.name(), bar_count),
                &bar_count,
                |b, _| {
                    b.iter(|| indicator.compute(black_box(&bars)));
                },
            );
        }
    }

    group.finish();
}

fn bench_derived_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_series");
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();

    for &bar_count in &[252, 1260, 2520] {
        let bars = synthetic_bars(start, bar_count);
        group.bench_with_input(BenchmarkId::from_parameter(bar_count), &bar_count, |b, _| {
            b.iter(|| DerivedSeries::compute(black_box(&bars)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_indicators, bench_derived_series);
criterion_main!(benches);
