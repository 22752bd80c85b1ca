//! Cascaded fan-out of one tick stream into three resolutions.
//!
//! All three tiers are driven from one shared cycle counter rather than
//! independent timers: the medium and coarse tiers always fold in a
//! value from the same fine-resolution sample stream, so tiers cannot
//! drift relative to each other.

use serde::{Deserialize, Serialize};

use crate::error::TrendResult;
use crate::scale::Scale;
use crate::series::{SmoothedSeries, Smoothing};

/// Fine ticks per medium update.
pub const FINE_PER_MEDIUM: u32 = 6;

/// Fine ticks per coarse update — one full cycle (an hour at the
/// reference 10-second base interval).
pub const CYCLE_LEN: u32 = 360;

/// Default retained entries per tier: 6 hours of fine samples, 2 days
/// of medium samples, 8 weeks of coarse samples.
pub const FINE_CAPACITY: usize = 2160;
pub const MEDIUM_CAPACITY: usize = 2880;
pub const COARSE_CAPACITY: usize = 1344;

/// Capacity and smoothing for one cascade tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub capacity: usize,
    pub smoothing: Smoothing,
}

/// Per-tier configuration for a cascade.
///
/// [`CascadeConfig::shared`] covers the common case of one initial
/// value and one smoothing policy across all tiers; the fields stay
/// public for tier-specific overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Value reported by `latest` before the first update.
    pub initial: f64,
    pub fine: TierConfig,
    pub medium: TierConfig,
    pub coarse: TierConfig,
}

impl CascadeConfig {
    /// Default capacities with one smoothing policy for every tier.
    pub fn shared(initial: f64, smoothing: Smoothing) -> Self {
        Self {
            initial,
            fine: TierConfig {
                capacity: FINE_CAPACITY,
                smoothing,
            },
            medium: TierConfig {
                capacity: MEDIUM_CAPACITY,
                smoothing,
            },
            coarse: TierConfig {
                capacity: COARSE_CAPACITY,
                smoothing,
            },
        }
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self::shared(0.0, Smoothing::default())
    }
}

/// Three bounded series at cascading resolutions plus the cycle
/// counter that routes each incoming tick.
#[derive(Debug, Clone)]
pub struct ScaleCascade {
    fine: SmoothedSeries,
    medium: SmoothedSeries,
    coarse: SmoothedSeries,
    /// Position within the current cycle, in `[0, CYCLE_LEN)`.
    cycle: u32,
}

impl ScaleCascade {
    pub fn new(config: CascadeConfig) -> TrendResult<Self> {
        Ok(Self {
            fine: SmoothedSeries::new(config.initial, config.fine.smoothing, config.fine.capacity)?,
            medium: SmoothedSeries::new(
                config.initial,
                config.medium.smoothing,
                config.medium.capacity,
            )?,
            coarse: SmoothedSeries::new(
                config.initial,
                config.coarse.smoothing,
                config.coarse.capacity,
            )?,
            cycle: 0,
        })
    }

    /// Feed one base-interval sample.
    ///
    /// The fine tier always updates; the medium tier updates on every
    /// 6th tick and the coarse tier once per cycle. Pure state
    /// transition — no failure states.
    pub fn record(&mut self, sample: f64) {
        self.fine.update(sample);
        if self.cycle % FINE_PER_MEDIUM == 0 {
            self.medium.update(sample);
        }
        if self.cycle == 0 {
            self.coarse.update(sample);
        }
        self.cycle = (self.cycle + 1) % CYCLE_LEN;
    }

    /// The series recording at the given resolution. Total: every
    /// variant maps to exactly one tier.
    pub fn series(&self, scale: Scale) -> &SmoothedSeries {
        match scale {
            Scale::Fine => &self.fine,
            Scale::Medium => &self.medium,
            Scale::Coarse => &self.coarse,
        }
    }

    /// Most recent smoothed value at the given resolution.
    pub fn latest(&self, scale: Scale) -> f64 {
        self.series(scale).latest()
    }

    /// Owned, oldest-first history copy at the given resolution.
    pub fn snapshot(&self, scale: Scale) -> Vec<f64> {
        self.series(scale).snapshot()
    }

    /// Position within the current cycle.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cascade() -> ScaleCascade {
        // Capacities large enough that every update appends an entry,
        // so tier lengths count updates exactly.
        ScaleCascade::new(CascadeConfig::shared(0.0, Smoothing::Replace)).unwrap()
    }

    #[test]
    fn one_cycle_updates_each_tier_deterministically() {
        let mut cascade = small_cascade();
        for i in 0..CYCLE_LEN {
            cascade.record(i as f64);
        }
        assert_eq!(cascade.series(Scale::Fine).len(), 360);
        assert_eq!(cascade.series(Scale::Medium).len(), 60);
        assert_eq!(cascade.series(Scale::Coarse).len(), 1);
        assert_eq!(cascade.cycle(), 0);
    }

    #[test]
    fn medium_updates_exactly_once_in_six_ticks() {
        let mut cascade = small_cascade();
        for i in 0..6 {
            cascade.record(i as f64);
        }
        assert_eq!(cascade.series(Scale::Medium).len(), 1);
    }

    #[test]
    fn coarse_updates_exactly_once_per_cycle() {
        let mut cascade = small_cascade();
        for i in 0..(2 * CYCLE_LEN) {
            cascade.record(i as f64);
        }
        assert_eq!(cascade.series(Scale::Coarse).len(), 2);
    }

    #[test]
    fn tiers_fold_the_same_sample_stream() {
        let mut cascade = small_cascade();
        for i in 0..CYCLE_LEN {
            cascade.record(i as f64);
        }
        // With Replace smoothing the medium tier retains the exact
        // samples seen on its ticks: 0, 6, 12, ...
        let medium = cascade.snapshot(Scale::Medium);
        assert_eq!(medium[0], 0.0);
        assert_eq!(medium[1], 6.0);
        assert_eq!(medium[59], 354.0);
        assert_eq!(cascade.snapshot(Scale::Coarse), vec![0.0]);
    }

    #[test]
    fn selection_maps_every_scale_to_its_own_tier() {
        let mut cascade = small_cascade();
        cascade.record(7.0);
        assert_eq!(cascade.latest(Scale::Fine), 7.0);
        assert_eq!(cascade.latest(Scale::Medium), 7.0);
        assert_eq!(cascade.latest(Scale::Coarse), 7.0);
        cascade.record(9.0);
        // Only the fine tier saw the second tick.
        assert_eq!(cascade.latest(Scale::Fine), 9.0);
        assert_eq!(cascade.latest(Scale::Medium), 7.0);
        assert_eq!(cascade.latest(Scale::Coarse), 7.0);
    }

    #[test]
    fn latest_before_first_update_is_the_initial_value() {
        let cascade =
            ScaleCascade::new(CascadeConfig::shared(3.5, Smoothing::default())).unwrap();
        for scale in Scale::ALL {
            assert_eq!(cascade.latest(scale), 3.5);
        }
    }

    #[test]
    fn tier_specific_overrides_are_respected() {
        let mut config = CascadeConfig::shared(0.0, Smoothing::Replace);
        config.fine.capacity = 4;
        let mut cascade = ScaleCascade::new(config).unwrap();
        for i in 0..10 {
            cascade.record(i as f64);
        }
        assert_eq!(cascade.snapshot(Scale::Fine), vec![6.0, 7.0, 8.0, 9.0]);
        assert_eq!(cascade.series(Scale::Medium).len(), 2);
    }

    #[test]
    fn invalid_tier_config_is_rejected_at_construction() {
        let mut config = CascadeConfig::default();
        config.medium.smoothing = Smoothing::Blend { decay: 1.5 };
        assert!(ScaleCascade::new(config).is_err());
    }
}
