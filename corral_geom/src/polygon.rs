// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed loops and simple polygons.

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};

use crate::primitives::{AREA_EPSILON, scale_about, signed_area, vertex_centroid};
use crate::resolve::is_self_intersecting;
use crate::triangulate::triangulate;

/// A ring of points whose first and last entries are equal.
///
/// A closed loop always holds at least [`ClosedLoop::MIN_LEN`] entries
/// (three distinct vertices plus the repeated closing point). It may cross
/// itself; use [`crate::resolve`] to turn it into simple polygons.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedLoop {
    points: Vec<Point>,
}

impl ClosedLoop {
    /// Minimum number of entries, including the repeated closing point.
    pub const MIN_LEN: usize = 4;

    /// Builds a closed loop from `points`.
    ///
    /// If the last point differs from the first, the first point is appended
    /// to close the ring. Returns `None` when fewer than three distinct ring
    /// positions remain.
    pub fn new(mut points: Vec<Point>) -> Option<Self> {
        let first = *points.first()?;
        if points.last() != Some(&first) || points.len() == 1 {
            points.push(first);
        }
        if points.len() < Self::MIN_LEN {
            return None;
        }
        Some(Self { points })
    }

    /// All entries, including the repeated closing point.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The ring's vertices without the repeated closing point.
    pub fn vertices(&self) -> &[Point] {
        &self.points[..self.points.len() - 1]
    }

    /// Number of entries, including the repeated closing point.
    #[allow(clippy::len_without_is_empty, reason = "A closed loop is never empty.")]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Signed shoelace area of the ring.
    pub fn signed_area(&self) -> f64 {
        signed_area(self.vertices())
    }

    /// Absolute shoelace area of the ring, ignoring any self-intersection.
    ///
    /// See [`crate::effective_area`] for the area of a crossed loop's lobes.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Mean of the distinct vertices.
    pub fn centroid(&self) -> Point {
        vertex_centroid(self.vertices()).unwrap_or(self.points[0])
    }

    /// Returns a copy uniformly scaled about [`Self::centroid`].
    ///
    /// The closing point stays equal to the first point.
    pub fn scaled(&self, factor: f64) -> Self {
        self.scaled_about(self.centroid(), factor)
    }

    /// Returns a copy uniformly scaled about `center`.
    pub fn scaled_about(&self, center: Point, factor: f64) -> Self {
        let mut points = scale_about(self.vertices(), center, factor);
        points.push(points[0]);
        Self { points }
    }

    /// Axis-aligned bounds of the ring.
    pub fn bounds(&self) -> Rect {
        bounds_of(&self.points)
    }

    /// Consumes the loop, returning its entries including the closing point.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// Why a candidate ring was not accepted as a [`SimplePolygon`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LobeDefect {
    /// Fewer than three distinct vertices.
    #[error("polygon has fewer than three vertices")]
    TooFewVertices,
    /// Absolute area at or below [`AREA_EPSILON`].
    #[error("polygon area is too small")]
    Degenerate,
    /// Two non-adjacent edges cross.
    #[error("polygon crosses itself")]
    SelfIntersecting,
}

/// A polygon whose edges do not cross and whose area is non-zero.
///
/// Vertices are stored without a repeated closing point. Winding is
/// whatever the source ring used; [`Self::signed_area`] reports it.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplePolygon {
    vertices: Vec<Point>,
}

impl SimplePolygon {
    /// Validates `vertices` as a simple polygon.
    ///
    /// A repeated closing point is dropped first. The ring must have at least
    /// three vertices, no pair of non-adjacent edges that cross, and an
    /// absolute area above [`AREA_EPSILON`]. Crossings are checked before
    /// area, so a crossed ring whose lobes cancel is reported as
    /// [`LobeDefect::SelfIntersecting`].
    pub fn new(mut vertices: Vec<Point>) -> Result<Self, LobeDefect> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(LobeDefect::TooFewVertices);
        }
        if is_self_intersecting(&vertices) {
            return Err(LobeDefect::SelfIntersecting);
        }
        if signed_area(&vertices).abs() <= AREA_EPSILON {
            return Err(LobeDefect::Degenerate);
        }
        Ok(Self { vertices })
    }

    /// The polygon's vertices, without a repeated closing point.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    #[allow(
        clippy::len_without_is_empty,
        reason = "A simple polygon always has at least three vertices."
    )]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Signed shoelace area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Absolute shoelace area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Point {
        vertex_centroid(&self.vertices).unwrap_or(self.vertices[0])
    }

    /// Returns a copy uniformly scaled about `center`.
    ///
    /// A positive `factor` preserves simplicity; the area changes by
    /// `factor²`.
    pub fn scaled_about(&self, center: Point, factor: f64) -> Self {
        Self {
            vertices: scale_about(&self.vertices, center, factor),
        }
    }

    /// Returns a copy uniformly scaled about [`Self::centroid`].
    pub fn scaled(&self, factor: f64) -> Self {
        self.scaled_about(self.centroid(), factor)
    }

    /// Axis-aligned bounds of the polygon.
    pub fn bounds(&self) -> Rect {
        bounds_of(&self.vertices)
    }

    /// Ear-clipping triangulation; see [`crate::triangulate`].
    pub fn triangulate(&self) -> Option<Vec<u32>> {
        triangulate(&self.vertices)
    }

    /// The polygon as a closed loop with the first vertex repeated.
    pub fn to_closed_loop(&self) -> ClosedLoop {
        let mut points = self.vertices.clone();
        points.push(self.vertices[0]);
        ClosedLoop { points }
    }

    /// The polygon outline as a closed [`BezPath`], for filling or
    /// [`kurbo::Shape::contains`] queries.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.vertices[0]);
        for &p in &self.vertices[1..] {
            path.line_to(p);
        }
        path.close_path();
        path
    }

    /// Consumes the polygon, returning its vertices.
    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }
}

fn bounds_of(points: &[Point]) -> Rect {
    let mut it = points.iter().copied();
    let Some(first) = it.next() else {
        return Rect::ZERO;
    };
    it.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p))
}
