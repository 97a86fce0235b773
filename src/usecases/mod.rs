//! Use Cases Layer - Request Decoration Chain
//!
//! Decorators that implement the `FetchService` port by wrapping
//! another `FetchService`. Each layer is transparent: it observes the
//! call and returns the inner result untouched, so the composition
//! order does not change what callers receive.
//!
//! Decorators:
//! - `MetricsService`: Console summary + Prometheus counters/latency
//! - `LogService`: Structured tracing event per call

pub mod log_service;
pub mod metrics_service;

pub use log_service::LogService;
pub use metrics_service::MetricsService;
