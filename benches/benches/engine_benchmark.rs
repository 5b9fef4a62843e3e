//! Resampling and window summary benchmarks.
//!
//! Run with: `cargo bench --package tickbars-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickbars_bench::{SyntheticConfig, synthetic_records, synthetic_store};
use tickbars_lib::{Anchor, Engine, EngineConfig, Interval, TickStore, resample};

const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

fn config(ticks: usize) -> SyntheticConfig {
    SyntheticConfig {
        ticks,
        ..SyntheticConfig::default()
    }
}

fn build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for ticks in SIZES {
        let records = synthetic_records(config(ticks));
        group.throughput(Throughput::Elements(ticks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &records, |b, records| {
            b.iter(|| TickStore::build(black_box(records.clone())));
        });
    }

    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    for ticks in SIZES {
        let store = synthetic_store(config(ticks)).unwrap();
        group.throughput(Throughput::Elements(ticks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &store, |b, store| {
            b.iter(|| resample(black_box(store), Interval::MINUTE));
        });
    }

    group.finish();
}

fn snapshot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for ticks in SIZES {
        let store = synthetic_store(config(ticks)).unwrap();
        let engine = Engine::new(store, EngineConfig::default()).unwrap();
        let last = engine.series().len() - 1;

        group.bench_with_input(BenchmarkId::new("last", ticks), &engine, |b, engine| {
            b.iter(|| engine.snapshot(black_box(Anchor::Index(last))));
        });
        group.bench_with_input(BenchmarkId::new("middle", ticks), &engine, |b, engine| {
            b.iter(|| engine.snapshot(black_box(Anchor::Index(last / 2))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    build_benchmark,
    resample_benchmark,
    snapshot_benchmark
);
criterion_main!(benches);
