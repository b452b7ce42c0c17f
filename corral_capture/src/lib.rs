// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Capture: turning a pointer drag into a closed lasso loop.
//!
//! A [`Stroke`] accumulates pointer samples while a drag is active, dropping
//! samples that land too close to the previous one. When the drag ends,
//! [`Stroke::finalize`] looks for the point where the stroke came back to
//! itself, trims the lead-in before it, and closes the ring exactly.
//!
//! Sampling pointer input, mapping it into world space, and drawing the
//! in-progress line are left to the caller.
//!
//! ```rust
//! use corral_capture::{CaptureParams, Stroke};
//! use kurbo::Point;
//!
//! let mut stroke = Stroke::new(CaptureParams::default());
//! for &(x, y) in &[
//!     (0.0, 0.0),
//!     (1.0, 0.0),
//!     (2.0, 0.0),
//!     (2.0, 1.0),
//!     (2.0, 2.0),
//!     (1.0, 2.0),
//!     (0.0, 2.0),
//!     (0.0, 0.2),
//! ] {
//!     stroke.add_point(Point::new(x, y), false);
//! }
//!
//! let closed = stroke.finalize().expect("stroke returns to its start");
//! assert_eq!(closed.points()[0], closed.points()[closed.len() - 1]);
//! assert!((closed.area() - 4.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod stroke;

pub use stroke::{MIN_BOUNDS_EXTENT, Stroke};

use corral_geom::ClosedLoop;

/// Parameters controlling stroke sampling and loop closure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureParams {
    /// Samples closer than this to the previous stored point are dropped
    /// unless forced.
    pub min_point_distance: f64,
    /// Minimum number of stored points for a stroke to close into a loop.
    ///
    /// Values below [`ClosedLoop::MIN_LEN`] are raised to it.
    pub min_points: usize,
    /// How close the final point must come to an earlier point for the
    /// stroke to be treated as returning there.
    pub close_distance: f64,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            min_point_distance: 0.1,
            min_points: 6,
            close_distance: 0.5,
        }
    }
}

impl CaptureParams {
    /// Returns a copy with negative distances floored at zero and
    /// `min_points` raised to at least [`ClosedLoop::MIN_LEN`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            min_point_distance: self.min_point_distance.max(0.0),
            min_points: self.min_points.max(ClosedLoop::MIN_LEN),
            close_distance: self.close_distance.max(0.0),
        }
    }
}
