// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic lasso shapes for the Corral benchmarks.

use core::f64::consts::TAU;

use corral_geom::ClosedLoop;
use kurbo::Point;

/// A star with `tips` points alternating between `inner` and `outer` radii.
///
/// The ring is simple and concave, so it exercises the ear clipper's
/// containment checks.
pub fn star(tips: usize, inner: f64, outer: f64) -> Vec<Point> {
    let n = tips * 2;
    (0..n)
        .map(|k| {
            let angle = TAU * k as f64 / n as f64;
            let radius = if k % 2 == 0 { outer } else { inner };
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// A figure-eight (lemniscate of Gerono) sampled at `samples` points.
///
/// Samples are offset by half a step so none lands on the waist, leaving a
/// single proper crossing there.
pub fn figure_eight(samples: usize, scale: f64) -> Vec<Point> {
    (0..samples)
        .map(|k| {
            let t = TAU * (k as f64 + 0.5) / samples as f64;
            Point::new(scale * t.cos(), scale * t.sin() * t.cos())
        })
        .collect()
}

/// Closes `points` into a loop.
///
/// # Panics
///
/// Panics if `points` has fewer than three distinct entries.
pub fn closed(points: Vec<Point>) -> ClosedLoop {
    ClosedLoop::new(points).expect("benchmark shapes have at least three points")
}
