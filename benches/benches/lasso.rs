// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver, triangulator, and full-gesture benchmarks.

use corral_benches::{closed, figure_eight, star};
use corral_geom::{first_crossing, resolve, triangulate};
use corral_lasso::{LassoParams, LassoSession};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn resolve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for samples in [64_usize, 256, 1024] {
        let simple = closed(star(samples / 2, 40.0, 100.0));
        let crossed = closed(figure_eight(samples, 100.0));

        group.bench_with_input(BenchmarkId::new("star", samples), &simple, |b, lp| {
            b.iter(|| resolve(black_box(lp)));
        });
        group.bench_with_input(
            BenchmarkId::new("figure_eight", samples),
            &crossed,
            |b, lp| b.iter(|| resolve(black_box(lp))),
        );
        group.bench_with_input(
            BenchmarkId::new("first_crossing_star", samples),
            &simple,
            |b, lp| b.iter(|| first_crossing(black_box(lp.vertices()))),
        );
    }
    group.finish();
}

fn triangulate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");
    for samples in [64_usize, 256, 1024] {
        let ring = star(samples / 2, 40.0, 100.0);
        group.bench_with_input(BenchmarkId::new("star", samples), &ring, |b, ring| {
            b.iter(|| triangulate(black_box(ring)));
        });
    }
    group.finish();
}

fn gesture_benchmark(c: &mut Criterion) {
    let stroke = figure_eight(256, 100.0);
    c.bench_function("gesture/figure_eight_256", |b| {
        b.iter(|| {
            let mut session = LassoSession::new(LassoParams::default());
            session.begin(stroke[0], None);
            for &point in &stroke[1..] {
                session.drag(point);
            }
            session.release(black_box(stroke[0]), None)
        });
    });
}

criterion_group!(
    benches,
    resolve_benchmark,
    triangulate_benchmark,
    gesture_benchmark
);
criterion_main!(benches);
