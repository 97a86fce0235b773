//! Metrics Adapters
//!
//! Prometheus registry fed by the metrics decorator and exported on
//! the API router under `/metrics`.

pub mod prometheus;

pub use self::prometheus::MetricsRegistry;
