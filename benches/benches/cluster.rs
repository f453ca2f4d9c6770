// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use emap_cluster::{Algorithm, GridAlgorithm, GridOptions};
use kurbo::Point;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 11) as f64) / ((1_u64 << 53) as f64)
    }
}

fn scattered(n: usize, extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = Lcg(seed);
    (0..n)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster/grid");

    // Dense maps collapse into few clusters; sparse ones keep most markers
    // apart and pay the full nearest-cluster scan.
    for (label, extent) in [("dense", 2_000.0), ("sparse", 50_000.0)] {
        for n in [100_usize, 1_000, 5_000] {
            let markers = scattered(n, extent, 7);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(BenchmarkId::new(label, n), &markers, |b, markers| {
                let mut grid = GridAlgorithm::new(GridOptions::default());
                b.iter(|| black_box(grid.calculate(1.0, markers.clone())));
            });
        }
    }

    group.finish();
}

fn bench_grid_by_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster/grid_ref");
    let markers = scattered(1_000, 10_000.0, 11);
    group.throughput(Throughput::Elements(markers.len() as u64));
    group.bench_function("1000", |b| {
        let grid = GridAlgorithm::default();
        b.iter(|| black_box(grid.cluster(markers.iter())));
    });
    group.finish();
}

criterion_group!(benches, bench_grid, bench_grid_by_reference);
criterion_main!(benches);
