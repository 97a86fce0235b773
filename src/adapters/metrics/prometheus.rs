//! Prometheus Metrics Registry - Fetch Observability
//!
//! Registers the request counters, latency histogram and upstream
//! gauge recorded by the metrics decorator, and renders them in the
//! Prometheus text format for the `/metrics` route.

use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Centralized Prometheus metrics for the fetch pipeline.
///
/// All metrics follow the naming convention `coin_fetcher_*` and carry
/// an `operation` label (`fetch_price` / `check_health`).
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Requests by operation and outcome (`ok` or an error kind).
    pub requests_total: IntCounterVec,
    /// End-to-end latency of the wrapped call.
    pub request_latency_seconds: HistogramVec,
    /// 1 when the last health check saw the upstream running.
    pub upstream_up: Gauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "coin_fetcher_requests_total",
                "Total fetch requests by operation and outcome",
            ),
            &["operation", "outcome"],
        )?;

        let request_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "coin_fetcher_request_latency_seconds",
                "Latency of upstream fetches in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["operation"],
        )?;

        let upstream_up = Gauge::new(
            "coin_fetcher_upstream_up",
            "Whether the last health check saw the upstream running (1=yes, 0=no)",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_latency_seconds.clone()))?;
        registry.register(Box::new(upstream_up.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_latency_seconds,
            upstream_up,
        })
    }

    /// Record one finished call.
    pub fn observe(&self, operation: &str, outcome: &str, latency_secs: f64) {
        self.requests_total
            .with_label_values(&[operation, outcome])
            .inc();
        self.request_latency_seconds
            .with_label_values(&[operation])
            .observe(latency_secs);
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
