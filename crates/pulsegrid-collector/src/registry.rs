//! Trend registry — named cascades plus the periodic tick loop.
//!
//! One writer (the tick loop) and any number of concurrent readers.
//! Pending inputs land in per-entry atomics, so request-path
//! instrumentation never contends with a tick in flight; each cascade
//! sits behind its own mutex, so a reader sees the state before or
//! after an update, never an interleaving.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use pulsegrid_trend::{CascadeConfig, Scale, ScaleCascade, TrendResult};

/// How a registered series obtains its per-tick sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    /// Events accumulated since the previous tick; drained to zero on
    /// every tick (e.g. requests per interval).
    Counter,
    /// A level read as-is on every tick (e.g. in-flight requests).
    Gauge,
}

/// A named trend to track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Stable identifier, used in API paths.
    pub id: String,
    /// Human-readable name for chart legends.
    pub display_name: String,
    /// Color hint for the rendering collaborator (e.g. "#ee1111").
    pub color: String,
    pub source: SampleSource,
    #[serde(default)]
    pub cascade: CascadeConfig,
}

/// One series' data as handed to the presentation boundary: the spec
/// plus owned copies of the selected tier's state.
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    pub spec: SeriesSpec,
    pub latest: f64,
    pub samples: Vec<f64>,
}

/// Registered series: pending input plus the cascade it feeds.
struct TrendEntry {
    spec: SeriesSpec,
    /// Counter series: event count. Gauge series: f64 level as raw bits.
    input: AtomicU64,
    cascade: Mutex<ScaleCascade>,
}

impl TrendEntry {
    fn take_sample(&self) -> f64 {
        match self.spec.source {
            SampleSource::Counter => self.input.swap(0, Ordering::Relaxed) as f64,
            SampleSource::Gauge => f64::from_bits(self.input.load(Ordering::Relaxed)),
        }
    }
}

/// Registry of named cascades, shared between the tick loop and readers.
#[derive(Clone)]
pub struct TrendRegistry {
    entries: Arc<RwLock<HashMap<String, Arc<TrendEntry>>>>,
    /// The base tick interval (the fine resolution's period).
    interval: Duration,
}

impl TrendRegistry {
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            interval,
        }
    }

    /// Base tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register a series. Re-registering an existing id keeps the
    /// already-accumulated history.
    pub async fn register(&self, spec: SeriesSpec) -> TrendResult<()> {
        let cascade = ScaleCascade::new(spec.cascade)?;
        let mut entries = self.entries.write().await;
        let id = spec.id.clone();
        entries.entry(id.clone()).or_insert_with(|| {
            Arc::new(TrendEntry {
                spec,
                input: AtomicU64::new(0),
                cascade: Mutex::new(cascade),
            })
        });
        debug!(%id, "registered trend series");
        Ok(())
    }

    /// Drop a series and its history.
    pub async fn unregister(&self, id: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(id);
        debug!(%id, "unregistered trend series");
    }

    /// Registered ids, sorted for deterministic listings.
    pub async fn ids(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        let mut ids: Vec<String> = entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Specs of every registered series, sorted by id.
    pub async fn list(&self) -> Vec<SeriesSpec> {
        let entries = self.entries.read().await;
        let mut specs: Vec<SeriesSpec> = entries.values().map(|e| e.spec.clone()).collect();
        specs.sort_by(|a, b| a.id.cmp(&b.id));
        specs
    }

    /// Record `n` events for a counter series. Unknown ids and
    /// non-counter series are no-ops.
    pub async fn add_count(&self, id: &str, n: u64) {
        let entries = self.entries.read().await;
        if let Some(e) = entries.get(id)
            && e.spec.source == SampleSource::Counter
        {
            e.input.fetch_add(n, Ordering::Relaxed);
        }
    }

    /// Set the current level of a gauge series. Unknown ids and
    /// non-gauge series are no-ops.
    pub async fn set_gauge(&self, id: &str, value: f64) {
        let entries = self.entries.read().await;
        if let Some(e) = entries.get(id)
            && e.spec.source == SampleSource::Gauge
        {
            e.input.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Advance every cascade by one base interval. The sole writer.
    pub async fn tick_all(&self) {
        let entries = self.entries.read().await;
        for entry in entries.values() {
            let sample = entry.take_sample();
            let mut cascade = entry.cascade.lock().await;
            cascade.record(sample);
        }
        debug!(series = entries.len(), "trend tick");
    }

    /// Owned history for one series at the given resolution.
    pub async fn snapshot(&self, id: &str, scale: Scale) -> Option<Vec<f64>> {
        Some(self.series_snapshot(id, scale).await?.samples)
    }

    /// Most recent smoothed value for one series at the given resolution.
    pub async fn latest(&self, id: &str, scale: Scale) -> Option<f64> {
        Some(self.series_snapshot(id, scale).await?.latest)
    }

    /// Everything the presentation boundary needs for one series, read
    /// under a single lock acquisition.
    pub async fn series_snapshot(&self, id: &str, scale: Scale) -> Option<SeriesSnapshot> {
        let entries = self.entries.read().await;
        let entry = entries.get(id)?.clone();
        drop(entries);

        let cascade = entry.cascade.lock().await;
        Some(SeriesSnapshot {
            spec: entry.spec.clone(),
            latest: cascade.latest(scale),
            samples: cascade.snapshot(scale),
        })
    }

    /// Run the tick loop until the shutdown signal fires.
    pub async fn run(&self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        info!(
            interval_millis = self.interval.as_millis() as u64,
            "trend collector started"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.tick_all().await;
                }
                _ = shutdown.changed() => {
                    info!("trend collector shutting down");
                    break;
                }
            }
        }
    }
}
