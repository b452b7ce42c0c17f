// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed, one-shot damage over a committed lasso.

use alloc::vec::Vec;
use core::hash::Hash;

use corral_geom::SimplePolygon;
use hashbrown::HashSet;
use kurbo::{BezPath, Point, Rect, Shape};
use smallvec::SmallVec;

/// A region waiting to deal its damage.
///
/// Counts down on [`Self::tick`] and hands out its [`DamageRegion`] exactly
/// once when the delay has elapsed.
#[derive(Clone, Debug)]
pub struct DamageArea {
    remaining: f64,
    region: Option<DamageRegion>,
}

impl DamageArea {
    /// Creates a pending area over `polygons`.
    ///
    /// Negative `delay_seconds` and `damage` are clamped to zero.
    pub fn new<I>(polygons: I, delay_seconds: f64, damage: f64) -> Self
    where
        I: IntoIterator<Item = SimplePolygon>,
    {
        let polygons: SmallVec<[SimplePolygon; 2]> = polygons.into_iter().collect();
        let paths = polygons.iter().map(SimplePolygon::to_bez_path).collect();
        let bounds = polygons
            .iter()
            .map(SimplePolygon::bounds)
            .reduce(|acc, r| acc.union(r));
        Self {
            remaining: delay_seconds.max(0.0),
            region: Some(DamageRegion {
                polygons,
                paths,
                bounds,
                damage: damage.max(0.0),
                spent: 0.0,
            }),
        }
    }

    /// Records the resource that was spent on this area.
    #[must_use]
    pub fn with_spent(mut self, spent: f64) -> Self {
        if let Some(region) = &mut self.region {
            region.spent = spent.max(0.0);
        }
        self
    }

    /// Seconds left before the area fires.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Whether the region has already been handed out.
    pub fn is_fired(&self) -> bool {
        self.region.is_none()
    }

    /// Advances the countdown by `dt` seconds.
    ///
    /// Returns the region on the tick the delay runs out, and `None` before
    /// and after.
    pub fn tick(&mut self, dt: f64) -> Option<DamageRegion> {
        self.region.as_ref()?;
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        if self.remaining > 0.0 {
            return None;
        }
        self.region.take()
    }
}

/// The covered region of a fired [`DamageArea`].
#[derive(Clone, Debug)]
pub struct DamageRegion {
    polygons: SmallVec<[SimplePolygon; 2]>,
    paths: SmallVec<[BezPath; 2]>,
    bounds: Option<Rect>,
    damage: f64,
    spent: f64,
}

impl DamageRegion {
    /// The lobes making up the region.
    pub fn polygons(&self) -> &[SimplePolygon] {
        &self.polygons
    }

    /// Damage to apply to each covered entity.
    pub fn damage(&self) -> f64 {
        self.damage
    }

    /// Resource that was spent on the lasso.
    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Union of the lobes' bounds, or `None` for an empty region.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether `point` lies inside any lobe.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.is_some_and(|bounds| bounds.contains(point))
            && self.paths.iter().any(|path| path.contains(point))
    }

    /// Keys of the `candidates` whose point lies inside the region.
    ///
    /// Each key is reported once, in order of first appearance, even if it
    /// is offered with several points.
    pub fn hits<K, I>(&self, candidates: I) -> Vec<K>
    where
        K: Hash + Eq + Clone,
        I: IntoIterator<Item = (K, Point)>,
    {
        let mut seen: HashSet<K> = HashSet::new();
        let mut hits = Vec::new();
        for (key, point) in candidates {
            if seen.contains(&key) || !self.contains(point) {
                continue;
            }
            seen.insert(key.clone());
            hits.push(key);
        }
        hits
    }
}
