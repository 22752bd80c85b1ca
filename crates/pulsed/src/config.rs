//! pulse.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pulsegrid_collector::{SampleSource, SeriesSpec};
use pulsegrid_trend::{CascadeConfig, Smoothing};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulseConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    /// Series tracked in addition to the built-in traffic trends.
    #[serde(default)]
    pub series: Vec<SeriesEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8750
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Base tick interval in seconds (the fine resolution's period).
    #[serde(default = "default_tick_secs")]
    pub tick_interval_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_secs(),
        }
    }
}

fn default_tick_secs() -> u64 {
    10
}

/// One `[[series]]` table in pulse.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub id: String,
    pub display_name: Option<String>,
    pub color: Option<String>,
    pub source: SampleSource,
    /// Smoothing override; the default is the heavy-damping blend.
    pub smoothing: Option<Smoothing>,
    /// Value reported before the first tick.
    pub initial: Option<f64>,
}

impl SeriesEntry {
    pub fn to_spec(&self) -> SeriesSpec {
        SeriesSpec {
            id: self.id.clone(),
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| self.id.clone()),
            color: self.color.clone().unwrap_or_else(|| "#888888".to_string()),
            source: self.source,
            cascade: CascadeConfig::shared(
                self.initial.unwrap_or(0.0),
                self.smoothing.unwrap_or_default(),
            ),
        }
    }
}

impl PulseConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PulseConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
