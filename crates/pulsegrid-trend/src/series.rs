//! Fixed-capacity series of smoothed samples.
//!
//! Memory is bounded by construction: once `capacity` entries have
//! accumulated, every update evicts exactly one oldest entry.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{TrendError, TrendResult};

/// How an incoming raw sample is folded into the retained value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    /// Exponential blend: `current' = decay * current + (1 - decay) * sample`.
    ///
    /// A decay near 1 responds slowly and damps spikes; a decay near 0
    /// tracks the raw sample closely. Requires `0 < decay < 1`.
    Blend { decay: f64 },
    /// No smoothing; the series retains raw samples as-is.
    Replace,
}

impl Smoothing {
    fn fold(&self, current: f64, sample: f64) -> f64 {
        match *self {
            Smoothing::Blend { decay } => decay * current + (1.0 - decay) * sample,
            Smoothing::Replace => sample,
        }
    }

    fn validate(&self) -> TrendResult<()> {
        if let Smoothing::Blend { decay } = *self
            && !(decay > 0.0 && decay < 1.0)
        {
            return Err(TrendError::InvalidDecay(decay));
        }
        Ok(())
    }
}

impl Default for Smoothing {
    /// Heavy damping: a one-interval spike barely moves the trend.
    fn default() -> Self {
        Smoothing::Blend { decay: 0.9 }
    }
}

/// Bounded history of smoothed values for one resolution.
///
/// Owned and mutated exclusively by its parent cascade tier; readers
/// only ever receive owned copies via [`SmoothedSeries::snapshot`].
#[derive(Debug, Clone)]
pub struct SmoothedSeries {
    /// Smoothed samples, oldest first. Never longer than `capacity`.
    history: VecDeque<f64>,
    /// The most recently appended value, or the initial value before
    /// the first update.
    current: f64,
    smoothing: Smoothing,
    capacity: usize,
}

impl SmoothedSeries {
    pub fn new(initial: f64, smoothing: Smoothing, capacity: usize) -> TrendResult<Self> {
        if capacity == 0 {
            return Err(TrendError::ZeroCapacity);
        }
        smoothing.validate()?;
        Ok(Self {
            history: VecDeque::with_capacity(capacity),
            current: initial,
            smoothing,
            capacity,
        })
    }

    /// Fold a raw sample into the series.
    ///
    /// Appends the new smoothed value, evicting the oldest entry when
    /// the series is at capacity. Always succeeds.
    pub fn update(&mut self, sample: f64) {
        self.current = self.smoothing.fold(self.current, sample);
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(self.current);
    }

    /// The most recent smoothed value.
    pub fn latest(&self) -> f64 {
        self.current
    }

    /// Owned, oldest-first copy of the retained history.
    pub fn snapshot(&self) -> Vec<f64> {
        self.history.iter().copied().collect()
    }

    /// Number of retained entries (at most `capacity`).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
