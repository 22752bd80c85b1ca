//! Error types for the trend core.

use thiserror::Error;

/// Result type alias for trend operations.
pub type TrendResult<T> = Result<T, TrendError>;

/// Errors that can occur constructing or selecting trend series.
///
/// Everything else in this crate is infallible by construction: the
/// scale ↔ tier mapping is an exhaustive match, and `update` has no
/// failure states.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrendError {
    #[error("unknown scale identifier: {0:?}")]
    UnknownScale(String),

    #[error("blend decay must be in (0, 1), got {0}")]
    InvalidDecay(f64),

    #[error("series capacity must be positive")]
    ZeroCapacity,
}
