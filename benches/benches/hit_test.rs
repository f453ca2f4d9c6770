// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use emap_editor::{Editor, EditorOptions, LineHitParams, ShapeKind, curve_polyline};
use emap_geometry::point_in_polygon;
use kurbo::{Point, Vec2};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 11) as f64) / ((1_u64 << 53) as f64)
    }

    fn point(&mut self, extent: f64) -> Point {
        Point::new(self.next_f64() * extent, self.next_f64() * extent)
    }
}

/// A star-shaped polygon with `n` vertices around `center`.
fn star(n: usize, center: Point, rng: &mut Lcg) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let r = 50.0 + rng.next_f64() * 50.0;
            center + Vec2::from_angle(angle) * r
        })
        .collect()
}

fn bench_point_in_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit/point_in_polygon");
    let mut rng = Lcg(3);
    for n in [8_usize, 64, 512] {
        let polygon = star(n, Point::new(100.0, 100.0), &mut rng);
        let probes: Vec<Point> = (0..256).map(|_| rng.point(200.0)).collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &polygon, |b, polygon| {
            b.iter(|| {
                probes
                    .iter()
                    .filter(|p| point_in_polygon(**p, black_box(polygon)))
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit/curve");
    let mut rng = Lcg(5);
    for n in [3_usize, 16, 128] {
        let points: Vec<Point> = (0..n).map(|_| rng.point(1_000.0)).collect();
        let params = LineHitParams::default();
        group.bench_with_input(BenchmarkId::new("flatten", n), &points, |b, points| {
            b.iter(|| black_box(curve_polyline(points)));
        });
        group.bench_with_input(BenchmarkId::new("hit_test", n), &points, |b, points| {
            b.iter(|| ShapeKind::Curve.hit_test(black_box(Point::new(500.0, 500.0)), points, &params));
        });
    }
    group.finish();
}

fn bench_select_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit/select_at");
    let mut rng = Lcg(9);
    for n in [16_usize, 256, 2_048] {
        let history = (0..n)
            .map(|i| {
                let a = rng.point(4_000.0);
                let b = a + Vec2::new(20.0 + rng.next_f64() * 80.0, 20.0 + rng.next_f64() * 80.0);
                match i % 3 {
                    0 => (ShapeKind::Rect, vec![a, b]),
                    1 => (ShapeKind::Line, vec![a, b]),
                    _ => (ShapeKind::Polygon, vec![a, b, Point::new(a.x, b.y)]),
                }
            })
            .collect();
        let mut editor = Editor::new(EditorOptions {
            history,
            ..EditorOptions::default()
        });
        let probes: Vec<Point> = (0..64).map(|_| rng.point(4_000.0)).collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                for p in &probes {
                    black_box(editor.select_at(*p));
                    editor.deselect();
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_point_in_polygon, bench_curve, bench_select_at);
criterion_main!(benches);
