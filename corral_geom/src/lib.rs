// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Geom: polygon geometry for free-hand lasso shapes.
//!
//! This crate holds the algorithmic core behind a lasso tool: the closed
//! loops produced by a pointer gesture, the simple polygons they are split
//! into, and the triangle meshes used to fill them. It is built on [`kurbo`];
//! input sampling and rendering are left to callers.
//!
//! # Key types
//!
//! - [`ClosedLoop`] – an ordered ring of points whose first and last entries
//!   coincide. This is what a finished stroke turns into.
//! - [`SimplePolygon`] – a ring with no crossing edges and non-zero area,
//!   stored without the repeated closing point.
//! - [`Resolution`] – the result of [`resolve`]: zero, one, or two simple
//!   polygons, plus the crossing that was cut and why any lobe was dropped.
//! - [`TriangleMesh`] – vertices and triangle indices covering one or more
//!   simple polygons.
//!
//! # Self-intersections
//!
//! Hand-drawn lassos routinely cross themselves. [`resolve`] finds the
//! *first* crossing in a fixed scan order and cuts the loop there into two
//! lobes that share the crossing point. Only one level of splitting is done:
//! a lobe that still crosses itself is dropped rather than cut again.
//!
//! ```rust
//! use corral_geom::{ClosedLoop, resolve};
//! use kurbo::Point;
//!
//! // A bow tie: the two diagonals cross at (1, 1).
//! let bow_tie = ClosedLoop::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(2.0, 2.0),
//!     Point::new(2.0, 0.0),
//!     Point::new(0.0, 2.0),
//! ])
//! .unwrap();
//!
//! let resolution = resolve(&bow_tie);
//! assert_eq!(resolution.polygons.len(), 2);
//! assert!((resolution.total_area() - 2.0).abs() < 1e-9);
//!
//! for lobe in &resolution.polygons {
//!     let indices = lobe.triangulate().unwrap();
//!     assert_eq!(indices.len(), 3 * (lobe.len() - 2));
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod polygon;
mod primitives;
mod resolve;
mod triangulate;

pub use polygon::{ClosedLoop, LobeDefect, SimplePolygon};
pub use primitives::{
    AREA_EPSILON, PARALLEL_EPSILON, polygon_area, scale_about, segment_crossing, signed_area,
    vertex_centroid,
};
pub use resolve::{Crossing, Resolution, effective_area, first_crossing, is_self_intersecting, resolve};
pub use triangulate::{EAR_EPSILON, TriangleMesh, triangulate};
