//! Ranking benchmarks over a 1000 x 100 frame, both axes, both code paths.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rankframe::{rank_matrix, Axis, Frame};
use strum::IntoEnumIterator;

fn create_frame(n_rows: usize, n_cols: usize) -> Frame<String, String> {
    let mut rng = StdRng::seed_from_u64(42);
    let values = Array2::from_shape_fn((n_rows, n_cols), |_| rng.random::<f64>() * 100.0);
    let rows = (0..n_rows).map(|i| format!("row_{}", i)).collect();
    let cols = (0..n_cols).map(|c| format!("col_{}", c)).collect();
    Frame::new(rows, cols, values).unwrap()
}

fn bench_rank(c: &mut Criterion) {
    let frame = create_frame(1000, 100);
    let mut group = c.benchmark_group("rank_1000x100");

    for axis in Axis::iter() {
        group.bench_with_input(BenchmarkId::new("frame", axis), &axis, |b, &axis| {
            b.iter(|| frame.rank(axis))
        });
        group.bench_with_input(BenchmarkId::new("trait", axis), &axis, |b, &axis| {
            b.iter(|| rank_matrix(&frame, axis).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
