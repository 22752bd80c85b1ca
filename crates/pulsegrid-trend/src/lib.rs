//! pulsegrid-trend — bounded multi-resolution trend storage.
//!
//! Retains a numeric metric over an unbounded horizon in bounded memory:
//! recent history at full resolution, older history progressively
//! coarser. One tick stream fans out to three fixed-capacity series
//! updated at different effective rates.
//!
//! # Architecture
//!
//! ```text
//! ScaleCascade
//!   ├── record(sample)        ← once per base interval
//!   │     ├── fine            every tick
//!   │     ├── medium          every 6th tick
//!   │     └── coarse          every 360th tick
//!   └── series(scale) → &SmoothedSeries
//!         ├── latest()        most recent smoothed value
//!         └── snapshot()      owned, oldest-first history copy
//! ```
//!
//! The crate is pure state transition: no I/O, no locking, no clocks.
//! Concurrency is the owner's concern (see `pulsegrid-collector`).

pub mod cascade;
pub mod error;
pub mod scale;
pub mod series;

pub use cascade::{CascadeConfig, ScaleCascade, TierConfig};
pub use error::{TrendError, TrendResult};
pub use scale::Scale;
pub use series::{SmoothedSeries, Smoothing};
