//! Lightweight in-process metrics.
//!
//! Dispatch outcomes and durations are stored as atomics and rendered in
//! Prometheus text format on demand (the binary logs them at shutdown).

pub mod metrics;

pub use metrics::{CounterVec, HistogramVec, RouterMetrics};
