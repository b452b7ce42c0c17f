// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Low-level helpers shared by the resolver, triangulator, and area code.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Absolute area below which a polygon is treated as degenerate.
pub const AREA_EPSILON: f64 = 1e-4;

/// Magnitude of `r × s` below which two segments are treated as parallel.
///
/// Parallel and collinear-overlapping segments never count as crossing.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Returns the point where segments `p0 → p1` and `q0 → q1` cross.
///
/// Both segment parameters must lie strictly inside `(0, 1)`, so segments
/// that merely touch at an endpoint do not cross. Parallel segments
/// (including collinear overlaps) return `None`.
pub fn segment_crossing(p0: Point, p1: Point, q0: Point, q1: Point) -> Option<Point> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = r.cross(s);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let qp = q0 - p0;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some(p0 + r * t)
    } else {
        None
    }
}

/// Shoelace signed area of a ring of points.
///
/// The ring is treated cyclically, so a repeated closing point contributes
/// nothing and may be present or absent. Counter-clockwise rings (in a y-up
/// frame) are positive. Fewer than three points yield `0.0`.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut prev = points[points.len() - 1];
    for &p in points {
        sum += prev.to_vec2().cross(p.to_vec2());
        prev = p;
    }
    sum * 0.5
}

/// Absolute shoelace area of a ring of points.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Arithmetic mean of `points`, or `None` when empty.
pub fn vertex_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let count = points.len() as f64;
    Some((sum / count).to_point())
}

/// Scales every point about `center` by `factor`.
pub fn scale_about(points: &[Point], center: Point, factor: f64) -> Vec<Point> {
    points
        .iter()
        .map(|&p| center + (p - center) * factor)
        .collect()
}
