//! pulsegrid-api — REST API for PulseGrid trend data.
//!
//! The presentation boundary: handlers select a resolution, pull owned
//! snapshots out of the registry, and return JSON for an external
//! rendering collaborator. Read-only — nothing here mutates a cascade.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/series` | List registered series |
//! | GET | `/api/v1/trend` | Combined trend data for several series |
//! | GET | `/api/v1/trend/{id}` | Trend data for one series |
//!
//! Both trend routes accept `?scale=fine|medium|coarse` (defaulting to
//! `medium` when absent) and reject unknown identifiers with 400.

pub mod handlers;
pub mod traffic;
pub mod views;

use axum::Router;
use axum::routing::get;
use pulsegrid_collector::TrendRegistry;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub registry: TrendRegistry,
}

/// Build the API router.
pub fn build_router(registry: TrendRegistry) -> Router {
    let state = ApiState { registry };

    let api_routes = Router::new()
        .route("/series", get(handlers::list_series))
        .route("/trend", get(handlers::get_trend))
        .route("/trend/{id}", get(handlers::get_series_trend))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}
