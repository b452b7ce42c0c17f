// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use log::trace;
use smallvec::SmallVec;

use crate::BudgetError;

/// A depletable, regenerating resource pool.
///
/// The pool starts full. Spends go through [`Budget::try_spend`] and either
/// take the whole amount or nothing. Refills queued with
/// [`Budget::regenerate_over_time`] are paid out by [`Budget::tick`]; each
/// queued refill progresses independently at
/// [`regen_per_second`](Budget::regen_per_second), so overlapping refills
/// stack.
#[derive(Clone, Debug)]
pub struct Budget {
    max: f64,
    current: f64,
    regen_per_second: f64,
    pending: SmallVec<[f64; 4]>,
}

impl Budget {
    /// Creates a full pool. Negative inputs are clamped to zero.
    pub fn new(max: f64, regen_per_second: f64) -> Self {
        let max = max.max(0.0);
        Self {
            max,
            current: max,
            regen_per_second: regen_per_second.max(0.0),
            pending: SmallVec::new(),
        }
    }

    /// Returns the pool with its current level set to `current`, clamped to
    /// `[0, max]`.
    #[must_use]
    pub fn with_current(mut self, current: f64) -> Self {
        self.current = current.clamp(0.0, self.max);
        self
    }

    /// Capacity of the pool.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Amount currently available.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Refill rate applied by [`Self::tick`].
    pub fn regen_per_second(&self) -> f64 {
        self.regen_per_second
    }

    /// Fill level in `[0, 1]`; zero for a pool with no capacity.
    pub fn normalized(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Whether nothing is left to spend.
    pub fn is_exhausted(&self) -> bool {
        self.current <= 0.0
    }

    /// Whether a positive `amount` could be spent right now.
    pub fn can_spend(&self, amount: f64) -> bool {
        amount > 0.0 && self.current >= amount
    }

    /// Spends `amount` if the pool holds at least that much.
    ///
    /// Non-positive amounts succeed without changing the pool. On failure
    /// the pool is untouched.
    pub fn try_spend(&mut self, amount: f64) -> Result<(), BudgetError> {
        if amount <= 0.0 {
            return Ok(());
        }
        if self.current < amount {
            return Err(BudgetError::Insufficient {
                cost: amount,
                available: self.current,
            });
        }
        self.current -= amount;
        trace!("spent {amount}, {} left", self.current);
        Ok(())
    }

    /// Queues `amount` to be refilled gradually by [`Self::tick`].
    pub fn regenerate_over_time(&mut self, amount: f64) {
        if amount > 0.0 {
            self.pending.push(amount);
        }
    }

    /// Total amount still queued for refill.
    pub fn pending_regen(&self) -> f64 {
        self.pending.iter().sum()
    }

    /// Advances queued refills by `dt` seconds.
    ///
    /// Each queued refill adds up to `regen_per_second * dt`, never pushing
    /// the pool past [`Self::max`]. Finished refills are dropped.
    pub fn tick(&mut self, dt: f64) {
        if dt <= 0.0 || self.pending.is_empty() {
            return;
        }
        let step = self.regen_per_second * dt;
        for remaining in &mut self.pending {
            let add = step.min(*remaining);
            self.current = (self.current + add).min(self.max);
            *remaining -= add;
        }
        self.pending.retain(|remaining| *remaining > 0.0);
    }
}
