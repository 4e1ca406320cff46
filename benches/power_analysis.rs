/// Power Analysis Benchmarks
///
/// Measures the cost of the noncentral t CDF, single power evaluations,
/// the bounded sample-size search and full table generation.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use evalstats::power::{
    build_power_tables, find_sample_size, noncentral_t_cdf, power_paired_t_test, PowerConfig,
    TableConfig, TailMode,
};
use evalstats::replay::{summarize, TrialRecord};

fn bench_noncentral_t_cdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("noncentral_t_cdf");
    group.measurement_time(Duration::from_secs(5));

    for &df in &[9.0, 49.0, 999.0] {
        group.bench_with_input(BenchmarkId::from_parameter(df), &df, |b, &df| {
            b.iter(|| noncentral_t_cdf(black_box(2.0), black_box(df), black_box(3.5)));
        });
    }

    group.finish();
}

fn bench_power_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("power_paired_t_test");
    group.measurement_time(Duration::from_secs(5));

    for &n in &[20usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| power_paired_t_test(black_box(n), 0.5, 0.017, TailMode::OneTailed));
        });
    }

    group.finish();
}

fn bench_sample_size_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_size_search");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(30);

    let config = PowerConfig::bonferroni(0.05, 3);
    for &d in &[0.8, 0.5, 0.3] {
        group.bench_with_input(BenchmarkId::from_parameter(d), &d, |b, &d| {
            b.iter(|| find_sample_size(black_box(d), &config));
        });
    }

    group.finish();
}

fn bench_power_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("power_tables");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let config = TableConfig::default();
    group.bench_function("default_grids", |b| {
        b.iter(|| build_power_tables(black_box(&config)));
    });

    group.finish();
}

fn bench_replay_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay_summary");
    group.measurement_time(Duration::from_secs(5));

    for &count in &[10usize, 1_000, 100_000] {
        let trials: Vec<TrialRecord> = (0..count)
            .map(|i| TrialRecord::new(1.0, 100.0 + (i % 97) as f64, "abc123"))
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &trials, |b, trials| {
            b.iter(|| summarize(black_box(trials)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_noncentral_t_cdf,
    bench_power_evaluation,
    bench_sample_size_search,
    bench_power_tables,
    bench_replay_summary
);

criterion_main!(benches);
