// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ear-clipping triangulation and triangle meshes.

use alloc::vec::Vec;

use kurbo::Point;

use crate::polygon::SimplePolygon;
use crate::primitives::signed_area;

/// Minimum `(b - a) × (c - a)` for a candidate ear to count as convex.
pub const EAR_EPSILON: f64 = 1e-10;

/// Triangulates the simple polygon `points` by ear clipping.
///
/// `points` must not repeat its first vertex at the end. The ring is walked
/// counter-clockwise regardless of its input winding. Returns exactly
/// `3 * (n - 2)` indices into `points`, or `None` when the input has fewer
/// than three points, is degenerate (for example all collinear), or no ear
/// can be found within the `2n` iteration budget.
pub fn triangulate(points: &[Point]) -> Option<Vec<u32>> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let count = u32::try_from(n).ok()?;
    let mut ring: Vec<u32> = if signed_area(points) > 0.0 {
        (0..count).collect()
    } else {
        (0..count).rev().collect()
    };

    let mut triangles = Vec::with_capacity(3 * (n - 2));
    let mut budget = 2 * ring.len();
    let mut v = ring.len() - 1;
    while ring.len() > 2 {
        if budget == 0 {
            return None;
        }
        budget -= 1;

        let len = ring.len();
        let u = if v < len { v } else { 0 };
        v = if u + 1 < len { u + 1 } else { 0 };
        let w = if v + 1 < len { v + 1 } else { 0 };

        if is_ear(points, &ring, u, v, w) {
            triangles.extend_from_slice(&[ring[u], ring[v], ring[w]]);
            ring.remove(v);
            budget = 2 * ring.len();
        }
    }
    Some(triangles)
}

fn at(points: &[Point], ring: &[u32], slot: usize) -> Point {
    points[ring[slot] as usize]
}

fn is_ear(points: &[Point], ring: &[u32], u: usize, v: usize, w: usize) -> bool {
    let a = at(points, ring, u);
    let b = at(points, ring, v);
    let c = at(points, ring, w);
    if (b - a).cross(c - a) < EAR_EPSILON {
        return false;
    }
    (0..ring.len())
        .filter(|&slot| slot != u && slot != v && slot != w)
        .all(|slot| !in_triangle(a, b, c, at(points, ring, slot)))
}

/// Whether `p` lies inside or on the boundary of triangle `abc`.
///
/// Points on an edge count as inside so that an ear is never cut across a
/// vertex lying on its diagonal.
fn in_triangle(a: Point, b: Point, c: Point, p: Point) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Vertices plus triangle indices covering one or more polygons.
///
/// Built fresh from polygons; never edited in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions, polygon after polygon.
    pub vertices: Vec<Point>,
    /// Triangle corner indices into [`Self::vertices`], three per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Triangulates a single polygon.
    pub fn from_polygon(polygon: &SimplePolygon) -> Option<Self> {
        let indices = polygon.triangulate()?;
        Some(Self {
            vertices: polygon.vertices().to_vec(),
            indices,
        })
    }

    /// Concatenates the triangulations of `polygons` into one mesh.
    ///
    /// Each polygon's indices are offset by the number of vertices already
    /// in the mesh. Polygons that fail to triangulate are left out; use
    /// [`Self::push_polygon`] to find out which.
    pub fn from_polygons<'a, I>(polygons: I) -> Self
    where
        I: IntoIterator<Item = &'a SimplePolygon>,
    {
        let mut mesh = Self::default();
        for polygon in polygons {
            mesh.push_polygon(polygon);
        }
        mesh
    }

    /// Appends the triangulation of `polygon`.
    ///
    /// Returns `false` and leaves the mesh unchanged when the polygon cannot
    /// be triangulated or the mesh has run out of `u32` indices.
    pub fn push_polygon(&mut self, polygon: &SimplePolygon) -> bool {
        let Ok(offset) = u32::try_from(self.vertices.len()) else {
            return false;
        };
        let Some(indices) = polygon.triangulate() else {
            return false;
        };
        self.vertices.extend_from_slice(polygon.vertices());
        self.indices.extend(indices.into_iter().map(|i| i + offset));
        true
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangle corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Sum of the absolute triangle areas.
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| 0.5 * (b - a).cross(c - a).abs())
            .sum()
    }
}
