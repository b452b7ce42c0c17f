// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The in-progress stroke and its closure into a loop.

use alloc::vec::Vec;

use corral_geom::ClosedLoop;
use kurbo::{Point, Rect};
use log::trace;

use crate::CaptureParams;

/// Bounds whose width and height are both at or below this are not reported.
pub const MIN_BOUNDS_EXTENT: f64 = 0.01;

/// An ordered run of pointer samples captured during one drag.
///
/// Points are only ever appended. The stroke is consumed by
/// [`Stroke::finalize`] when the drag ends.
#[derive(Clone, Debug)]
pub struct Stroke {
    params: CaptureParams,
    points: Vec<Point>,
}

impl Stroke {
    /// Creates an empty stroke. `params` are [sanitized](CaptureParams::sanitized).
    pub fn new(params: CaptureParams) -> Self {
        Self {
            params: params.sanitized(),
            points: Vec::with_capacity(256),
        }
    }

    /// The sanitized parameters this stroke was created with.
    pub fn params(&self) -> &CaptureParams {
        &self.params
    }

    /// Appends `point`, returning whether it was stored.
    ///
    /// Unless `force` is set, a point closer than
    /// [`CaptureParams::min_point_distance`] to the last stored point is
    /// dropped. The first point is always stored.
    pub fn add_point(&mut self, point: Point, force: bool) -> bool {
        let too_close = !force
            && self
                .points
                .last()
                .is_some_and(|last| last.distance(point) < self.params.min_point_distance);
        if too_close {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Points stored so far, in capture order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recently stored point.
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Discards every stored point, keeping the allocation.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Bounds of the points stored so far.
    ///
    /// `None` while the stroke is empty or its width and height are both at
    /// most [`MIN_BOUNDS_EXTENT`].
    pub fn bounds(&self) -> Option<Rect> {
        let (&first, rest) = self.points.split_first()?;
        let bounds = rest
            .iter()
            .fold(Rect::from_points(first, first), |acc, &p| acc.union_pt(p));
        if bounds.width() > MIN_BOUNDS_EXTENT || bounds.height() > MIN_BOUNDS_EXTENT {
            Some(bounds)
        } else {
            None
        }
    }

    /// Index of the earlier point the stroke returned to, if any.
    ///
    /// This is the earliest point before the last one that lies within
    /// [`CaptureParams::close_distance`] of the last point.
    pub fn close_index(&self) -> Option<usize> {
        let (&last, earlier) = self.points.split_last()?;
        earlier
            .iter()
            .position(|p| p.distance(last) <= self.params.close_distance)
    }

    /// Closes the stroke into a loop.
    ///
    /// Returns `None` when fewer than [`CaptureParams::min_points`] points
    /// were stored. Otherwise the points before [`Self::close_index`] are
    /// dropped (nothing is dropped when the stroke never came back near
    /// itself), the last point is set equal to the first, and the result is
    /// checked against `min_points` once more.
    pub fn finalize(self) -> Option<ClosedLoop> {
        let min_points = self.params.min_points;
        if self.points.len() < min_points {
            trace!(
                "stroke of {} points is shorter than {min_points}",
                self.points.len()
            );
            return None;
        }

        let start = self.close_index().unwrap_or(0);
        let mut points = self.points;
        points.drain(..start);
        let first = points[0];
        if let Some(last) = points.last_mut() {
            *last = first;
        }

        if points.len() < min_points {
            trace!(
                "closed loop of {} points after trimming {start} is shorter than {min_points}",
                points.len()
            );
            return None;
        }
        ClosedLoop::new(points)
    }
}
