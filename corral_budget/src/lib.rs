// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Budget: pricing lasso shapes by area against a finite pool.
//!
//! - [`Budget`] is the depletable, regenerating resource pool a player draws
//!   from. Spends are all-or-nothing.
//! - [`AreaBudgetController`] prices a shape at a fixed cost per unit area.
//!   A shape that costs more than the pool holds is scaled down about its
//!   vertex centroid until it fits, rather than rejected outright.
//! - [`AreaShape`] is the seam between the two: anything with an area that
//!   can be uniformly scaled. It is implemented for
//!   [`SimplePolygon`](corral_geom::SimplePolygon) and for
//!   [`ClosedLoop`](corral_geom::ClosedLoop), where a self-crossing loop is
//!   charged for both of its lobes.
//!
//! ```rust
//! use corral_budget::{AreaBudgetController, Budget};
//! use corral_geom::SimplePolygon;
//! use kurbo::Point;
//!
//! let square = SimplePolygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ])
//! .unwrap();
//!
//! let mut budget = Budget::new(100.0, 30.0).with_current(25.0);
//! let controller = AreaBudgetController::new(1.0);
//!
//! let spent = controller.evaluate(&square, Some(&mut budget)).unwrap();
//! assert!(spent.clamped);
//! assert_eq!(spent.area, 25.0);
//! assert_eq!(spent.cost, 25.0);
//! assert_eq!(budget.current(), 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod budget;
mod controller;

pub use budget::Budget;
pub use controller::{AreaBudgetController, AreaShape, Evaluation};

/// Why a shape could not be paid for.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum BudgetError {
    /// The pool is empty, so no area at all is affordable.
    #[error("budget is exhausted")]
    Exhausted,
    /// The cost exceeds what is available, even after scaling.
    #[error("cost {cost} exceeds available {available}")]
    Insufficient {
        /// What the shape would cost.
        cost: f64,
        /// What the pool held.
        available: f64,
    },
}
