//! Request instrumentation feeding the built-in traffic trends.
//!
//! The daemon charts its own request load: one counter series for
//! requests per interval and one gauge series for the in-flight level.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use pulsegrid_collector::{SampleSource, SeriesSpec, TrendRegistry};
use pulsegrid_trend::CascadeConfig;

pub const REQUESTS_SERIES: &str = "http_requests";
pub const INFLIGHT_SERIES: &str = "http_inflight";

pub fn requests_spec() -> SeriesSpec {
    SeriesSpec {
        id: REQUESTS_SERIES.to_string(),
        display_name: "Requests per interval".to_string(),
        color: "#ee1111".to_string(),
        source: SampleSource::Counter,
        cascade: CascadeConfig::default(),
    }
}

pub fn inflight_spec() -> SeriesSpec {
    SeriesSpec {
        id: INFLIGHT_SERIES.to_string(),
        display_name: "In-flight requests".to_string(),
        color: "#3366cc".to_string(),
        source: SampleSource::Gauge,
        cascade: CascadeConfig::default(),
    }
}

/// Shared state for the tracking middleware.
#[derive(Clone)]
pub struct TrafficMonitor {
    registry: TrendRegistry,
    in_flight: Arc<AtomicU64>,
}

impl TrafficMonitor {
    pub fn new(registry: TrendRegistry) -> Self {
        Self {
            registry,
            in_flight: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// axum middleware: counts the request and tracks the in-flight level.
pub async fn track(
    State(monitor): State<TrafficMonitor>,
    request: Request,
    next: Next,
) -> Response {
    monitor.registry.add_count(REQUESTS_SERIES, 1).await;
    let level = monitor.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
    monitor.registry.set_gauge(INFLIGHT_SERIES, level as f64).await;

    let response = next.run(request).await;

    let level = monitor.in_flight.fetch_sub(1, Ordering::Relaxed) - 1;
    monitor.registry.set_gauge(INFLIGHT_SERIES, level as f64).await;
    response
}
