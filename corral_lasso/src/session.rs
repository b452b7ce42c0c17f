// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lasso gesture state machine.

use corral_budget::{AreaBudgetController, Budget};
use corral_capture::Stroke;
use corral_geom::{ClosedLoop, SimplePolygon, TriangleMesh, resolve};
use kurbo::{Point, Rect};
use log::debug;
use smallvec::SmallVec;

use crate::{DamageArea, LassoParams, LassoRejection};

/// Observable phase of a [`LassoSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// A stroke is being captured.
    Drawing,
}

/// A lasso that passed every check and was paid for.
#[derive(Clone, Debug, PartialEq)]
pub struct CommittedLasso {
    /// Simple polygons enclosed by the lasso: one, or two lobes of a loop
    /// that crossed itself once. Lobes that could not be triangulated are
    /// not included.
    pub polygons: SmallVec<[SimplePolygon; 2]>,
    /// Fill triangles for [`Self::polygons`].
    pub mesh: TriangleMesh,
    /// The closed loop as committed, after any scaling.
    pub outline: ClosedLoop,
    /// Area that was charged for.
    pub area: f64,
    /// Resource spent. Zero when no budget was metered.
    pub cost: f64,
    /// Whether the loop was scaled down to fit the budget.
    pub clamped: bool,
    /// Seconds until the lasso's damage fires.
    pub delay: f64,
    /// Damage applied to each covered entity.
    pub damage: f64,
}

impl CommittedLasso {
    /// A pending damage area over this lasso's polygons.
    pub fn damage_area(&self) -> DamageArea {
        DamageArea::new(self.polygons.iter().cloned(), self.delay, self.damage)
            .with_spent(self.cost)
    }
}

/// Drives one lasso gesture at a time.
///
/// Call [`Self::begin`] on pointer-down, [`Self::drag`] on every move, and
/// [`Self::release`] on pointer-up. [`Self::cancel`] abandons the gesture.
#[derive(Clone, Debug)]
pub struct LassoSession {
    params: LassoParams,
    controller: AreaBudgetController,
    stroke: Option<Stroke>,
}

impl LassoSession {
    /// Creates an idle session.
    pub fn new(params: LassoParams) -> Self {
        Self {
            params,
            controller: AreaBudgetController::new(params.cost_per_unit_area),
            stroke: None,
        }
    }

    /// The parameters this session was created with.
    pub fn params(&self) -> &LassoParams {
        &self.params
    }

    /// Current phase.
    pub fn state(&self) -> GestureState {
        if self.stroke.is_some() {
            GestureState::Drawing
        } else {
            GestureState::Idle
        }
    }

    /// The stroke being captured, if drawing.
    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    /// Bounds of the stroke being captured, for previews.
    pub fn bounds(&self) -> Option<Rect> {
        self.stroke.as_ref().and_then(Stroke::bounds)
    }

    /// Starts a gesture at `point`.
    ///
    /// Returns `false` and changes nothing when a gesture is already in
    /// progress or when `budget` is given and exhausted.
    pub fn begin(&mut self, point: Point, budget: Option<&Budget>) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        if budget.is_some_and(Budget::is_exhausted) {
            debug!("lasso refused: budget exhausted");
            return false;
        }
        let mut stroke = Stroke::new(self.params.capture);
        stroke.add_point(point, true);
        self.stroke = Some(stroke);
        true
    }

    /// Extends the gesture to `point`, returning whether it was stored.
    pub fn drag(&mut self, point: Point) -> bool {
        self.stroke
            .as_mut()
            .is_some_and(|stroke| stroke.add_point(point, false))
    }

    /// Abandons the gesture in progress, if any.
    pub fn cancel(&mut self) {
        if self.stroke.take().is_some() {
            debug!("lasso cancelled");
        }
    }

    /// Ends the gesture at `point` and tries to commit it.
    ///
    /// The stroke is closed, priced against `budget` by the area of its
    /// lobes (shrinking it to fit when it costs too much), split at its first
    /// crossing, and triangulated. The cost is spent only when all of that
    /// succeeds. The session is idle afterwards whatever the outcome.
    pub fn release(
        &mut self,
        point: Point,
        budget: Option<&mut Budget>,
    ) -> Result<CommittedLasso, LassoRejection> {
        let Some(mut stroke) = self.stroke.take() else {
            return Err(LassoRejection::NotDrawing);
        };
        stroke.add_point(point, true);

        let result = self.commit(stroke, budget);
        match &result {
            Ok(lasso) => debug!(
                "lasso committed: {} polygon(s), area {}, cost {}{}",
                lasso.polygons.len(),
                lasso.area,
                lasso.cost,
                if lasso.clamped { " (scaled to fit)" } else { "" }
            ),
            Err(rejection) => debug!("lasso rejected: {rejection}"),
        }
        result
    }

    fn commit(
        &self,
        stroke: Stroke,
        budget: Option<&mut Budget>,
    ) -> Result<CommittedLasso, LassoRejection> {
        let points = stroke.len();
        let min_points = stroke.params().min_points;
        let closed = stroke
            .finalize()
            .ok_or(LassoRejection::TooShortStroke { points, min_points })?;

        let available = budget.as_deref().map(Budget::current);
        let evaluation = self.controller.plan(&closed, available)?;

        let resolution = resolve(&evaluation.shape);
        if resolution.is_empty() {
            return Err(if resolution.has_unresolved_crossing() {
                LassoRejection::UnresolvableSelfIntersection
            } else {
                LassoRejection::DegeneratePolygon
            });
        }
        let mut polygons = resolution.polygons;
        let mut mesh = TriangleMesh::default();
        polygons.retain(|polygon| {
            let meshed = mesh.push_polygon(polygon);
            if !meshed {
                debug!(
                    "dropping lobe of {} vertices that did not triangulate",
                    polygon.len()
                );
            }
            meshed
        });
        if polygons.is_empty() {
            return Err(LassoRejection::DegeneratePolygon);
        }

        if let Some(budget) = budget {
            budget.try_spend(evaluation.cost)?;
        }

        Ok(CommittedLasso {
            polygons,
            mesh,
            outline: evaluation.shape,
            area: evaluation.area,
            cost: evaluation.cost,
            clamped: evaluation.clamped,
            delay: self.params.area_delay_seconds.max(0.0),
            damage: self.params.damage.max(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use corral_budget::BudgetError;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Begins at the first point, drags through the middle, releases at the
    /// last.
    fn draw(
        session: &mut LassoSession,
        coords: &[(f64, f64)],
        budget: Option<&mut Budget>,
    ) -> Result<CommittedLasso, LassoRejection> {
        let (&(x0, y0), rest) = coords.split_first().expect("non-empty stroke");
        let (&(xn, yn), middle) = rest.split_last().expect("at least two points");
        assert!(session.begin(p(x0, y0), budget.as_deref()), "gesture starts");
        for &(x, y) in middle {
            session.drag(p(x, y));
        }
        session.release(p(xn, yn), budget)
    }

    fn unit_square_clockwise() -> Vec<(f64, f64)> {
        let mut coords = Vec::new();
        for k in 0..5 {
            coords.push((0.0, f64::from(k) * 0.2));
        }
        for k in 0..5 {
            coords.push((f64::from(k) * 0.2, 1.0));
        }
        for k in 0..5 {
            coords.push((1.0, 1.0 - f64::from(k) * 0.2));
        }
        for k in 0..5 {
            coords.push((1.0 - f64::from(k) * 0.2, 0.0));
        }
        coords.push((0.0, 0.0));
        coords
    }

    const FIGURE_EIGHT: &[(f64, f64)] = &[
        (0.0, 0.0),
        (1.0, 0.0),
        (3.0, 2.0),
        (4.0, 2.0),
        (4.0, 0.0),
        (3.0, 0.0),
        (1.0, 2.0),
        (0.0, 2.0),
        (0.0, 1.0),
        (0.0, 0.1),
    ];

    const BIG_SQUARE: &[(f64, f64)] = &[
        (0.0, 0.0),
        (5.0, 0.0),
        (10.0, 0.0),
        (10.0, 5.0),
        (10.0, 10.0),
        (5.0, 10.0),
        (0.0, 10.0),
        (0.0, 5.0),
        (0.0, 0.2),
    ];

    #[test]
    fn unit_square_commits_end_to_end() {
        let mut session = LassoSession::new(LassoParams::default());
        let lasso = draw(&mut session, &unit_square_clockwise(), None).expect("square commits");
        assert_eq!(session.state(), GestureState::Idle);
        assert_eq!(lasso.outline.len(), 21);
        assert_eq!(lasso.polygons.len(), 1);
        assert!((lasso.area - 1.0).abs() < 1e-9);
        assert_eq!(lasso.cost, 0.0);
        assert_eq!(lasso.mesh.triangle_count(), 18);
        assert!((lasso.mesh.area() - 1.0).abs() < 1e-9);
        assert_eq!(lasso.delay, 1.0);
        assert_eq!(lasso.damage, 3.0);
    }

    #[test]
    fn figure_eight_commits_both_lobes() {
        let mut session = LassoSession::new(LassoParams::default());
        let mut budget = Budget::new(100.0, 0.0);
        let lasso = draw(&mut session, FIGURE_EIGHT, Some(&mut budget)).expect("lobes commit");
        assert_eq!(lasso.polygons.len(), 2);
        for polygon in &lasso.polygons {
            assert!((polygon.area() - 3.0).abs() < 1e-9);
        }
        assert!((lasso.area - 6.0).abs() < 1e-9);
        assert!((lasso.mesh.area() - 6.0).abs() < 1e-9);
        assert!((budget.current() - 94.0).abs() < 1e-9);
    }

    #[test]
    fn lobe_that_fails_to_triangulate_is_dropped() {
        // A figure-eight whose right lobe is two squares touching at (4, 1).
        let mut session = LassoSession::new(LassoParams::default());
        let mut budget = Budget::new(100.0, 0.0);
        let lasso = draw(
            &mut session,
            &[
                (0.0, 0.0),
                (1.0, 0.0),
                (3.0, 2.0),
                (4.0, 2.0),
                (4.0, 1.0),
                (5.0, 1.0),
                (5.0, 0.0),
                (4.0, 0.0),
                (4.0, 1.0),
                (3.0, 1.0),
                (3.0, 0.0),
                (1.0, 2.0),
                (0.0, 2.0),
                (0.0, 1.0),
                (0.0, 0.1),
            ],
            Some(&mut budget),
        )
        .expect("left lobe commits");
        assert_eq!(lasso.polygons.len(), 1);
        assert!(lasso.polygons[0].vertices().contains(&p(0.0, 2.0)));
        assert!((lasso.polygons[0].area() - 3.0).abs() < 1e-9);
        assert_eq!(lasso.mesh.vertices, lasso.polygons[0].vertices());
        assert!((lasso.mesh.area() - 3.0).abs() < 1e-9);
        // The outline was priced whole.
        assert!((lasso.cost - 6.0).abs() < 1e-9);
        assert!((budget.current() - 94.0).abs() < 1e-9);
    }

    #[test]
    fn over_budget_lasso_is_scaled_and_spends_everything() {
        let mut session = LassoSession::new(LassoParams::default());
        let mut budget = Budget::new(100.0, 0.0).with_current(25.0);
        let lasso = draw(&mut session, BIG_SQUARE, Some(&mut budget)).expect("scaled commit");
        assert!(lasso.clamped);
        assert_eq!(lasso.area, 25.0);
        assert_eq!(lasso.cost, 25.0);
        assert_eq!(budget.current(), 0.0);
        assert_eq!(lasso.outline.points()[0], p(2.5, 2.5));
        assert_eq!(lasso.mesh.area(), 25.0);
    }

    #[test]
    fn exhausted_budget_blocks_the_gesture() {
        let mut session = LassoSession::new(LassoParams::default());
        let mut budget = Budget::new(100.0, 0.0).with_current(0.0);
        assert!(!session.begin(p(0.0, 0.0), Some(&budget)));
        assert_eq!(session.state(), GestureState::Idle);

        // A gesture started without the budget still cannot be paid for.
        assert!(session.begin(p(0.0, 0.0), None));
        for &(x, y) in &BIG_SQUARE[1..BIG_SQUARE.len() - 1] {
            session.drag(p(x, y));
        }
        assert_eq!(
            session.release(p(0.0, 0.2), Some(&mut budget)),
            Err(LassoRejection::InsufficientBudget(BudgetError::Exhausted))
        );
        assert_eq!(budget.current(), 0.0);
    }

    #[test]
    fn short_stroke_is_rejected() {
        let mut session = LassoSession::new(LassoParams::default());
        let result = draw(
            &mut session,
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)],
            None,
        );
        assert_eq!(
            result,
            Err(LassoRejection::TooShortStroke {
                points: 4,
                min_points: 6
            })
        );
        assert_eq!(session.state(), GestureState::Idle);
    }

    #[test]
    fn flat_stroke_is_degenerate_and_free() {
        let mut session = LassoSession::new(LassoParams::default());
        let mut budget = Budget::new(100.0, 0.0);
        let result = draw(
            &mut session,
            &[
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 0.0),
                (3.0, 0.0),
                (4.0, 0.0),
                (5.0, 0.0),
                (0.0, 0.0),
            ],
            Some(&mut budget),
        );
        assert_eq!(result, Err(LassoRejection::DegeneratePolygon));
        assert_eq!(budget.current(), 100.0);
    }

    #[test]
    fn doubly_crossed_lobes_are_rejected_without_spending() {
        let mut session = LassoSession::new(LassoParams::default());
        let mut budget = Budget::new(100.0, 0.0);
        let result = draw(
            &mut session,
            &[
                (1.0, 1.0),
                (4.0, 1.0),
                (3.0, 0.0),
                (4.0, 0.0),
                (3.0, 3.0),
                (4.0, 3.0),
                (1.0, 1.2),
            ],
            Some(&mut budget),
        );
        assert_eq!(result, Err(LassoRejection::UnresolvableSelfIntersection));
        assert_eq!(budget.current(), 100.0);
    }

    #[test]
    fn gesture_lifecycle() {
        let mut session = LassoSession::new(LassoParams::default());
        assert_eq!(
            session.release(p(0.0, 0.0), None),
            Err(LassoRejection::NotDrawing)
        );
        assert!(!session.drag(p(1.0, 1.0)));
        assert!(session.bounds().is_none());

        assert!(session.begin(p(0.0, 0.0), None));
        assert!(!session.begin(p(5.0, 5.0), None), "already drawing");
        assert!(session.drag(p(2.0, 1.0)));
        assert!(!session.drag(p(2.0, 1.05)), "too close to the last point");
        assert_eq!(session.stroke().map(Stroke::len), Some(2));
        assert_eq!(session.bounds(), Some(Rect::new(0.0, 0.0, 2.0, 1.0)));

        session.cancel();
        assert_eq!(session.state(), GestureState::Idle);
        assert!(session.stroke().is_none());
    }

    #[test]
    fn unmetered_session_ignores_the_budget() {
        let params = LassoParams {
            cost_per_unit_area: 0.0,
            ..LassoParams::default()
        };
        let mut session = LassoSession::new(params);
        let mut budget = Budget::new(10.0, 0.0);
        let lasso = draw(&mut session, BIG_SQUARE, Some(&mut budget)).expect("free commit");
        assert!(!lasso.clamped);
        assert_eq!(lasso.area, 100.0);
        assert_eq!(lasso.cost, 0.0);
        assert_eq!(budget.current(), 10.0);
    }
}
