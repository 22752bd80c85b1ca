//! pulsegrid-collector — drives named trend cascades from one loop.
//!
//! The registry owns every tracked metric's cascade, converts pending
//! inputs (event counters or gauge levels) into one sample per base
//! interval, and exposes the thread-safe read path used by the API.
//!
//! # Architecture
//!
//! ```text
//! TrendRegistry
//!   ├── add_count()/set_gauge() ← lock-free input recording
//!   ├── tick_all()              ← the single writer, once per interval
//!   ├── snapshot()/latest()     ← concurrent readers, owned copies only
//!   └── run()                   ← periodic tick loop until shutdown
//! ```

pub mod registry;

pub use registry::{SampleSource, SeriesSnapshot, SeriesSpec, TrendRegistry};
