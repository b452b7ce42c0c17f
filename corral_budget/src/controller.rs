// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area pricing and scale-to-fit.

use corral_geom::{AREA_EPSILON, ClosedLoop, SimplePolygon, effective_area};
use log::trace;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{Budget, BudgetError};

/// A shape that can be priced by area and shrunk to fit a budget.
pub trait AreaShape: Sized {
    /// Area charged for the shape.
    fn area(&self) -> f64;

    /// A copy uniformly scaled by `factor` about the shape's vertex centroid.
    fn scaled(&self, factor: f64) -> Self;
}

impl AreaShape for SimplePolygon {
    fn area(&self) -> f64 {
        Self::area(self)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self::scaled(self, factor)
    }
}

/// A crossed loop is charged for the lobes at its first crossing.
impl AreaShape for ClosedLoop {
    fn area(&self) -> f64 {
        effective_area(self)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self::scaled(self, factor)
    }
}

/// The outcome of pricing a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation<S> {
    /// The shape to commit: the input itself, or a scaled-down copy.
    pub shape: S,
    /// Area of [`Self::shape`].
    pub area: f64,
    /// Resource charged for [`Self::shape`]. Zero when unmetered.
    pub cost: f64,
    /// Whether the shape was scaled down to fit.
    pub clamped: bool,
}

/// Prices shapes at a fixed cost per unit area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaBudgetController {
    /// Resource charged per unit of area. Zero or less disables metering.
    pub cost_per_unit_area: f64,
}

impl Default for AreaBudgetController {
    fn default() -> Self {
        Self {
            cost_per_unit_area: 1.0,
        }
    }
}

impl AreaBudgetController {
    /// Creates a controller charging `cost_per_unit_area`.
    pub fn new(cost_per_unit_area: f64) -> Self {
        Self { cost_per_unit_area }
    }

    /// Whether shapes are charged at all.
    pub fn is_metered(&self) -> bool {
        self.cost_per_unit_area > 0.0
    }

    /// Area charged for `shape`.
    pub fn compute_area<S: AreaShape>(&self, shape: &S) -> f64 {
        shape.area()
    }

    /// Cost of `area` at this controller's rate, never negative.
    pub fn cost_of(&self, area: f64) -> f64 {
        if self.is_metered() {
            area.max(0.0) * self.cost_per_unit_area
        } else {
            0.0
        }
    }

    /// Decides what committing `shape` against `available` resource would
    /// produce, without spending anything.
    ///
    /// With no budget (`None`) or an unmetered rate the shape is accepted as
    /// is at zero cost. A shape that fits is accepted unchanged. Otherwise it
    /// is scaled about its vertex centroid by `sqrt(max_allowed / area)` and
    /// re-priced; if rounding still leaves the cost above `available`, the
    /// shape is rejected.
    pub fn plan<S: AreaShape + Clone>(
        &self,
        shape: &S,
        available: Option<f64>,
    ) -> Result<Evaluation<S>, BudgetError> {
        let area = shape.area();
        let Some(available) = available.filter(|_| self.is_metered()) else {
            return Ok(Evaluation {
                shape: shape.clone(),
                area,
                cost: 0.0,
                clamped: false,
            });
        };

        let available = available.max(0.0);
        let max_allowed_area = available / self.cost_per_unit_area;
        if max_allowed_area <= 0.0 {
            return Err(BudgetError::Exhausted);
        }

        if area <= max_allowed_area {
            return Ok(Evaluation {
                shape: shape.clone(),
                area,
                cost: self.cost_of(area),
                clamped: false,
            });
        }

        let factor = (max_allowed_area / area.max(AREA_EPSILON)).sqrt();
        let scaled = shape.scaled(factor);
        let scaled_area = scaled.area();
        let cost = self.cost_of(scaled_area);
        trace!("scaled shape by {factor}: area {area} -> {scaled_area}, cost {cost}");
        if cost > available {
            return Err(BudgetError::Insufficient { cost, available });
        }
        Ok(Evaluation {
            shape: scaled,
            area: scaled_area,
            cost,
            clamped: true,
        })
    }

    /// Prices `shape` and spends the cost from `budget` in one step.
    ///
    /// On any error the budget is left untouched.
    pub fn evaluate<S: AreaShape + Clone>(
        &self,
        shape: &S,
        budget: Option<&mut Budget>,
    ) -> Result<Evaluation<S>, BudgetError> {
        match budget {
            Some(budget) => {
                let evaluation = self.plan(shape, Some(budget.current()))?;
                budget.try_spend(evaluation.cost)?;
                Ok(evaluation)
            }
            None => self.plan(shape, None),
        }
    }
}
