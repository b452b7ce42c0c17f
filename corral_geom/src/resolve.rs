// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting a self-intersecting loop into simple lobes.
//!
//! The scan visits edge pairs `(i, j)` with `j >= i + 2` in increasing `i`,
//! then increasing `j`, skipping the pair that shares the wrap-around vertex.
//! The first crossing found in that order is the one that gets cut; it is a
//! fixed tie-break, not a measure of which crossing matters most.

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::polygon::{ClosedLoop, LobeDefect, SimplePolygon};
use crate::primitives::{polygon_area, segment_crossing};

/// A crossing between two non-adjacent edges of a ring.
///
/// Edge `k` runs from vertex `k` to vertex `(k + 1) % n`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    /// Index of the earlier edge.
    pub first_edge: usize,
    /// Index of the later edge; always at least `first_edge + 2`.
    pub second_edge: usize,
    /// Where the two edges cross.
    pub point: Point,
}

/// Finds the first crossing in scan order over the cyclic ring `vertices`.
///
/// `vertices` must not repeat its first point at the end.
pub fn first_crossing(vertices: &[Point]) -> Option<Crossing> {
    let n = vertices.len();
    if n < 4 {
        return None;
    }
    for i in 0..n {
        let a0 = vertices[i];
        let a1 = vertices[(i + 1) % n];
        for j in (i + 2)..n {
            // Edges 0 and n - 1 share vertex 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = vertices[j];
            let b1 = vertices[(j + 1) % n];
            if let Some(point) = segment_crossing(a0, a1, b0, b1) {
                return Some(Crossing {
                    first_edge: i,
                    second_edge: j,
                    point,
                });
            }
        }
    }
    None
}

/// Whether any two non-adjacent edges of the cyclic ring `vertices` cross.
pub fn is_self_intersecting(vertices: &[Point]) -> bool {
    first_crossing(vertices).is_some()
}

/// Walks from the crossing through vertices `start_edge + 1 ..= end_edge`
/// (wrapping), giving a ring that starts at the crossing point.
fn cut_lobe(vertices: &[Point], start_edge: usize, end_edge: usize, point: Point) -> Vec<Point> {
    let n = vertices.len();
    let stop = (end_edge + 1) % n;
    let mut lobe = Vec::with_capacity(n + 1);
    lobe.push(point);
    let mut v = (start_edge + 1) % n;
    while v != stop {
        lobe.push(vertices[v]);
        v = (v + 1) % n;
    }
    lobe
}

/// The two rings on either side of `crossing`.
fn cut_lobes(vertices: &[Point], crossing: &Crossing) -> [Vec<Point>; 2] {
    [
        cut_lobe(
            vertices,
            crossing.first_edge,
            crossing.second_edge,
            crossing.point,
        ),
        cut_lobe(
            vertices,
            crossing.second_edge,
            crossing.first_edge,
            crossing.point,
        ),
    ]
}

/// Outcome of [`resolve`].
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// Accepted simple polygons: one for a loop that never crosses itself,
    /// up to two for a loop cut at its first crossing.
    pub polygons: SmallVec<[SimplePolygon; 2]>,
    /// The crossing that was cut, if the loop crossed itself.
    pub crossing: Option<Crossing>,
    /// Why each rejected candidate was dropped.
    pub defects: SmallVec<[LobeDefect; 2]>,
}

impl Resolution {
    /// Whether no polygon survived.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Sum of the accepted polygons' absolute areas.
    pub fn total_area(&self) -> f64 {
        self.polygons.iter().map(SimplePolygon::area).sum()
    }

    /// Whether any candidate was dropped because it still crossed itself.
    pub fn has_unresolved_crossing(&self) -> bool {
        self.defects.contains(&LobeDefect::SelfIntersecting)
    }
}

/// Resolves `lp` into simple polygons.
///
/// A loop without crossings comes back as its own single polygon, vertices
/// unchanged. Otherwise it is cut at the [first crossing](first_crossing)
/// into two lobes, each kept only if it validates as a [`SimplePolygon`].
/// Lobes that still cross themselves are dropped, not cut again.
pub fn resolve(lp: &ClosedLoop) -> Resolution {
    let vertices = lp.vertices();
    let mut resolution = Resolution::default();

    let Some(crossing) = first_crossing(vertices) else {
        match SimplePolygon::new(vertices.to_vec()) {
            Ok(polygon) => resolution.polygons.push(polygon),
            Err(defect) => resolution.defects.push(defect),
        }
        return resolution;
    };

    resolution.crossing = Some(crossing);
    for lobe in cut_lobes(vertices, &crossing) {
        match SimplePolygon::new(lobe) {
            Ok(polygon) => resolution.polygons.push(polygon),
            Err(defect) => resolution.defects.push(defect),
        }
    }
    resolution
}

/// Area charged for a loop.
///
/// For a loop that crosses itself this is the sum of both lobes' absolute
/// areas at the first crossing, whether or not the lobes would validate.
/// Otherwise it is the plain shoelace area.
pub fn effective_area(lp: &ClosedLoop) -> f64 {
    let vertices = lp.vertices();
    match first_crossing(vertices) {
        Some(crossing) => cut_lobes(vertices, &crossing)
            .iter()
            .map(|lobe| polygon_area(lobe))
            .sum(),
        None => polygon_area(vertices),
    }
}
