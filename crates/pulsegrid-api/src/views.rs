//! View types for trend responses.
//!
//! Purpose-built for the rendering collaborator: scale metadata is
//! pre-resolved (tick duration, label format) and every series carries
//! its display name and color hint next to the ordered samples, so the
//! renderer never reaches back into the registry.

use chrono::Utc;
use serde::Serialize;

use pulsegrid_collector::{SeriesSnapshot, TrendRegistry};
use pulsegrid_trend::Scale;

/// Trend data for several series at one resolution.
#[derive(Debug, Serialize)]
pub struct TrendView {
    pub scale: Scale,
    /// Wall-clock milliseconds between two consecutive samples.
    pub tick_millis: u64,
    /// strftime-style pattern suited to axis labels at this scale.
    pub label_format: &'static str,
    /// RFC 3339 timestamp of when this view was assembled; the renderer
    /// derives per-sample timestamps from it and `tick_millis`.
    pub generated_at: String,
    pub series: Vec<SeriesView>,
}

impl TrendView {
    pub fn new(scale: Scale, series: Vec<SeriesView>) -> Self {
        Self {
            scale,
            tick_millis: scale.tick_duration().as_millis() as u64,
            label_format: scale.label_format(),
            generated_at: Utc::now().to_rfc3339(),
            series,
        }
    }
}

/// One series' data at the selected resolution.
#[derive(Debug, Serialize)]
pub struct SeriesView {
    pub id: String,
    pub display_name: String,
    pub color: String,
    pub latest: f64,
    /// Smoothed samples, oldest first.
    pub samples: Vec<f64>,
}

impl From<SeriesSnapshot> for SeriesView {
    fn from(snap: SeriesSnapshot) -> Self {
        Self {
            id: snap.spec.id,
            display_name: snap.spec.display_name,
            color: snap.spec.color,
            latest: snap.latest,
            samples: snap.samples,
        }
    }
}

/// Assemble views for the requested series, preserving request order.
/// Unknown ids are skipped rather than failing the whole request.
pub async fn collect_views(
    registry: &TrendRegistry,
    scale: Scale,
    ids: &[String],
) -> Vec<SeriesView> {
    let mut series = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(snap) = registry.series_snapshot(id, scale).await {
            series.push(SeriesView::from(snap));
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsegrid_collector::{SampleSource, SeriesSpec};
    use pulsegrid_trend::{CascadeConfig, Smoothing};
    use std::time::Duration;

    fn spec(id: &str) -> SeriesSpec {
        SeriesSpec {
            id: id.to_string(),
            display_name: format!("Series {id}"),
            color: "#3366cc".to_string(),
            source: SampleSource::Counter,
            cascade: CascadeConfig::shared(0.0, Smoothing::Replace),
        }
    }

    async fn seeded_registry() -> TrendRegistry {
        let reg = TrendRegistry::new(Duration::from_secs(10));
        reg.register(spec("a")).await.unwrap();
        reg.register(spec("b")).await.unwrap();
        reg.add_count("a", 3).await;
        reg.add_count("b", 5).await;
        reg.tick_all().await;
        reg
    }

    #[test]
    fn trend_view_resolves_scale_metadata() {
        let view = TrendView::new(Scale::Fine, Vec::new());
        assert_eq!(view.tick_millis, 10_000);
        assert_eq!(view.label_format, "%H:%M:%S");
        assert!(view.series.is_empty());
    }

    #[tokio::test]
    async fn collect_views_preserves_request_order() {
        let reg = seeded_registry().await;
        let ids = vec!["b".to_string(), "a".to_string()];
        let views = collect_views(&reg, Scale::Fine, &ids).await;

        let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(views[0].samples, vec![5.0]);
        assert_eq!(views[1].samples, vec![3.0]);
    }

    #[tokio::test]
    async fn collect_views_skips_unknown_ids() {
        let reg = seeded_registry().await;
        let ids = vec!["a".to_string(), "ghost".to_string(), "b".to_string()];
        let views = collect_views(&reg, Scale::Fine, &ids).await;

        let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn series_view_carries_spec_metadata() {
        let reg = seeded_registry().await;
        let snap = reg
            .series_snapshot("a", Scale::Fine)
            .await
            .expect("series registered");
        let view = SeriesView::from(snap);

        assert_eq!(view.display_name, "Series a");
        assert_eq!(view.color, "#3366cc");
        assert_eq!(view.latest, 3.0);
    }
}
