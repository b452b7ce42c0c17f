// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Lasso: one lasso gesture from pointer-down to a committed region.
//!
//! A [`LassoSession`] drives the gesture state machine:
//!
//! ```text
//! Idle -> Drawing -> Idle                 (cancelled, too short)
//!                 -> Resolving -> Idle      (rejected, degenerate)
//!                              -> Committed (cost spent, region handed over)
//! ```
//!
//! Resolving happens synchronously inside [`LassoSession::release`], which
//! either returns a [`CommittedLasso`] or a [`LassoRejection`]. Either way the
//! session is idle again afterwards and ready for the next gesture.
//!
//! A committed lasso carries the simple polygons to fill, their
//! [`TriangleMesh`](corral_geom::TriangleMesh), and the outline to redraw.
//! [`CommittedLasso::damage_area`] turns it into a [`DamageArea`] that fires
//! once after the configured delay and reports which entities it covers.
//!
//! Rejections are ordinary outcomes of hand-drawn input: nothing is spent and
//! nothing is produced.
//!
//! ```rust
//! use corral_budget::Budget;
//! use corral_lasso::{LassoParams, LassoSession};
//! use kurbo::Point;
//!
//! let mut budget = Budget::new(100.0, 30.0);
//! let mut session = LassoSession::new(LassoParams::default());
//!
//! assert!(session.begin(Point::new(0.0, 0.0), Some(&budget)));
//! for &(x, y) in &[(2.0, 0.0), (4.0, 0.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (0.0, 4.0)] {
//!     session.drag(Point::new(x, y));
//! }
//! let lasso = session
//!     .release(Point::new(0.0, 0.3), Some(&mut budget))
//!     .expect("square commits");
//!
//! assert_eq!(lasso.polygons.len(), 1);
//! assert!((lasso.area - 16.0).abs() < 1e-9);
//! assert!((budget.current() - 84.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod session;

pub use damage::{DamageArea, DamageRegion};
pub use session::{CommittedLasso, GestureState, LassoSession};

use corral_budget::BudgetError;
use corral_capture::CaptureParams;

/// Configuration for a [`LassoSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LassoParams {
    /// Stroke sampling and loop closure.
    pub capture: CaptureParams,
    /// Resource charged per unit of enclosed area. Zero or less disables
    /// metering.
    pub cost_per_unit_area: f64,
    /// Seconds between committing a lasso and its damage firing.
    pub area_delay_seconds: f64,
    /// Damage applied to each entity the region covers.
    pub damage: f64,
}

impl Default for LassoParams {
    fn default() -> Self {
        Self {
            capture: CaptureParams::default(),
            cost_per_unit_area: 1.0,
            area_delay_seconds: 1.0,
            damage: 3.0,
        }
    }
}

/// Why a released gesture produced nothing.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LassoRejection {
    /// [`LassoSession::release`] was called without a gesture in progress.
    #[error("no lasso gesture is in progress")]
    NotDrawing,
    /// The stroke was too short to close into a loop.
    #[error("stroke of {points} points is shorter than {min_points}")]
    TooShortStroke {
        /// Points the stroke held when it was released.
        points: usize,
        /// The configured minimum.
        min_points: usize,
    },
    /// The loop enclosed no usable area or could not be triangulated.
    #[error("lasso encloses no usable area")]
    DegeneratePolygon,
    /// Every lobe left after splitting still crossed itself.
    #[error("lasso crosses itself more than once")]
    UnresolvableSelfIntersection,
    /// The budget could not pay for the shape.
    #[error(transparent)]
    InsufficientBudget(#[from] BudgetError),
}
