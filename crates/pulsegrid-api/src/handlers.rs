//! REST API handlers.
//!
//! Each handler reads via `TrendRegistry` and returns JSON responses.
//! The contract with the core is select-then-snapshot, never mutate.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use pulsegrid_trend::Scale;

use crate::ApiState;
use crate::views::{SeriesView, TrendView, collect_views};

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

/// Query parameters shared by the trend routes.
#[derive(Deserialize)]
pub struct TrendQuery {
    /// Resolution identifier; absent means medium.
    pub scale: Option<String>,
    /// Comma-separated series ids; absent means every registered series.
    pub series: Option<String>,
}

// ── Series ─────────────────────────────────────────────────────

/// GET /api/v1/series
pub async fn list_series(State(state): State<ApiState>) -> impl IntoResponse {
    ApiResponse::ok(state.registry.list().await)
}

// ── Trends ─────────────────────────────────────────────────────

/// GET /api/v1/trend?scale=fine&series=a,b
pub async fn get_trend(
    State(state): State<ApiState>,
    Query(query): Query<TrendQuery>,
) -> impl IntoResponse {
    let scale = match Scale::parse_or_default(query.scale.as_deref()) {
        Ok(scale) => scale,
        Err(e) => return error_response(&e.to_string(), StatusCode::BAD_REQUEST).into_response(),
    };

    let ids = match &query.series {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => state.registry.ids().await,
    };

    let series = collect_views(&state.registry, scale, &ids).await;
    ApiResponse::ok(TrendView::new(scale, series)).into_response()
}

/// GET /api/v1/trend/{id}?scale=coarse
pub async fn get_series_trend(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<TrendQuery>,
) -> impl IntoResponse {
    let scale = match Scale::parse_or_default(query.scale.as_deref()) {
        Ok(scale) => scale,
        Err(e) => return error_response(&e.to_string(), StatusCode::BAD_REQUEST).into_response(),
    };

    match state.registry.series_snapshot(&id, scale).await {
        Some(snap) => ApiResponse::ok(TrendView::new(scale, vec![SeriesView::from(snap)]))
            .into_response(),
        None => error_response("series not found", StatusCode::NOT_FOUND).into_response(),
    }
}
