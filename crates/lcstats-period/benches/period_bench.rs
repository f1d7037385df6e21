use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lcstats_period::{frequency_grid, lomb_scargle, periodogram};

fn sine_curve(n: usize) -> (Vec<f64>, Vec<f64>) {
    let times: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
    let values: Vec<f64> = times
        .iter()
        .map(|&t| (2.0 * std::f64::consts::PI * t / 4.0).sin())
        .collect();
    (times, values)
}

fn bench_lomb_scargle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lomb_scargle");
    group.sample_size(20);
    for size in [100usize, 500, 1_000] {
        let (times, values) = sine_curve(size);
        let grid = frequency_grid(&times).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| lomb_scargle(black_box(&times), black_box(&values), &grid).unwrap())
        });
    }
    group.finish();
}

fn bench_periodogram_with_grid(c: &mut Criterion) {
    let (times, values) = sine_curve(300);
    c.bench_function("periodogram/300", |b| {
        b.iter(|| periodogram(black_box(&times), black_box(&values)).unwrap())
    });
}

criterion_group!(benches, bench_lomb_scargle, bench_periodogram_with_grid);
criterion_main!(benches);
