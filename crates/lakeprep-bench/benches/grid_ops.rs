//! Criterion micro-benchmarks for vertical grid operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lakeprep_bench::{deep_lake, deep_lake_policies};
use lakeprep_core::{MemorySink, Profile};
use lakeprep_grid::{
    build_layer_grid, interpolate_profile_report, write_initial_condition, LayerGrid,
    TemperatureSource,
};
use lakeprep_test_utils::init_config;

/// Benchmark: generate the layer grid for each spacing method.
fn bench_layer_grid(c: &mut Criterion) {
    let depth = deep_lake().unwrap();
    for (name, policy) in deep_lake_policies() {
        c.bench_function(&format!("layer_grid_{name}"), |b| {
            b.iter(|| {
                let grid = LayerGrid::from_policy(depth, black_box(&policy)).unwrap();
                black_box(grid.layer_count());
            });
        });
    }
}

/// Benchmark: build and render `si3d_layer.txt` into memory.
fn bench_layer_file(c: &mut Criterion) {
    let depth = deep_lake().unwrap();
    let (_, policy) = deep_lake_policies().remove(0);
    c.bench_function("layer_file_uniform_500", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new();
            build_layer_grid(depth, &policy, &mut sink).unwrap();
            black_box(sink.len());
        });
    });
}

/// Benchmark: interpolate a 1 m CTD cast onto every midpoint, then write
/// the initial-condition file.
fn bench_initial_condition(c: &mut Criterion) {
    let depth = deep_lake().unwrap();
    let (_, policy) = deep_lake_policies().remove(1);
    let grid = LayerGrid::from_policy(depth, &policy).unwrap();
    let pairs: Vec<(f64, f64)> = (0..=600)
        .map(|z| (f64::from(z), 4.0 + 16.0 * (-f64::from(z) / 30.0).exp()))
        .collect();
    let profile = Profile::from_pairs(&pairs).unwrap();
    let targets: Vec<f64> = grid.midpoints().iter().map(|z| -z).collect();

    c.bench_function("interpolate_ctd_onto_grid", |b| {
        b.iter(|| black_box(interpolate_profile_report(black_box(&targets), &profile)));
    });

    let source = TemperatureSource::Profile(profile.clone());
    c.bench_function("initial_condition_file", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new();
            write_initial_condition(&init_config(0), &grid, &source, None, &mut sink).unwrap();
            black_box(sink.len());
        });
    });
}

criterion_group!(
    benches,
    bench_layer_grid,
    bench_layer_file,
    bench_initial_condition
);
criterion_main!(benches);
