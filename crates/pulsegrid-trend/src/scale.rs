//! The closed set of chart resolutions.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TrendError, TrendResult};

/// Which cascade tier to read, and how to label it.
///
/// Each variant carries its tick duration and axis-label format as
/// data, so selection is a total mapping with no fallback arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// One sample every 10 seconds.
    Fine,
    /// One sample every minute.
    Medium,
    /// One sample every hour.
    Coarse,
}

impl Scale {
    /// All variants, finest first.
    pub const ALL: [Scale; 3] = [Scale::Fine, Scale::Medium, Scale::Coarse];

    /// Stable external identifier, used in query strings and JSON.
    pub fn identifier(&self) -> &'static str {
        match self {
            Scale::Fine => "fine",
            Scale::Medium => "medium",
            Scale::Coarse => "coarse",
        }
    }

    /// Wall-clock time between two samples at this resolution.
    pub fn tick_duration(&self) -> Duration {
        match self {
            Scale::Fine => Duration::from_secs(10),
            Scale::Medium => Duration::from_secs(60),
            Scale::Coarse => Duration::from_secs(3600),
        }
    }

    /// Format pattern (strftime-style) suited to axis labels at this
    /// resolution. Rendering is the consumer's concern.
    pub fn label_format(&self) -> &'static str {
        match self {
            Scale::Fine => "%H:%M:%S",
            Scale::Medium => "%H:%M",
            Scale::Coarse => "%b/%d %H",
        }
    }

    /// Case-insensitive lookup of an identifier.
    ///
    /// Unknown identifiers are rejected, never defaulted; use
    /// [`Scale::parse_or_default`] for the absent-identifier case.
    pub fn parse(text: &str) -> TrendResult<Self> {
        match text.to_ascii_lowercase().as_str() {
            "fine" => Ok(Scale::Fine),
            "medium" => Ok(Scale::Medium),
            "coarse" => Ok(Scale::Coarse),
            _ => Err(TrendError::UnknownScale(text.to_string())),
        }
    }

    /// Parse an optional identifier; absence or an empty string selects
    /// the medium resolution.
    pub fn parse_or_default(text: Option<&str>) -> TrendResult<Self> {
        match text {
            Some(t) if !t.trim().is_empty() => Self::parse(t),
            _ => Ok(Scale::Medium),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_round_trips_for_every_variant() {
        for scale in Scale::ALL {
            assert_eq!(Scale::parse(scale.identifier()).unwrap(), scale);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Scale::parse("FINE").unwrap(), Scale::Fine);
        assert_eq!(Scale::parse("Medium").unwrap(), Scale::Medium);
        assert_eq!(Scale::parse("cOaRsE").unwrap(), Scale::Coarse);
    }

    #[test]
    fn absent_identifier_defaults_to_medium() {
        assert_eq!(Scale::parse_or_default(None).unwrap(), Scale::Medium);
        assert_eq!(Scale::parse_or_default(Some("")).unwrap(), Scale::Medium);
        assert_eq!(Scale::parse_or_default(Some("  ")).unwrap(), Scale::Medium);
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = Scale::parse("bogus").unwrap_err();
        assert_eq!(err, TrendError::UnknownScale("bogus".to_string()));
        // The explicit-but-wrong case must not silently default.
        assert!(Scale::parse_or_default(Some("bogus")).is_err());
    }

    #[test]
    fn tick_durations_are_ordered() {
        assert!(Scale::Fine.tick_duration() < Scale::Medium.tick_duration());
        assert!(Scale::Medium.tick_duration() < Scale::Coarse.tick_duration());
        assert_eq!(Scale::Fine.tick_duration(), Duration::from_secs(10));
    }

    #[test]
    fn serde_uses_the_stable_identifiers() {
        for scale in Scale::ALL {
            let json = serde_json::to_string(&scale).unwrap();
            assert_eq!(json, format!("\"{}\"", scale.identifier()));
            let back: Scale = serde_json::from_str(&json).unwrap();
            assert_eq!(back, scale);
        }
    }
}
