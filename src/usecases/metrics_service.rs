//! Metrics Decorator - Outcome and Latency Recording
//!
//! Wraps any `FetchService`, times the inner call, prints a summary of
//! the outcome to the console and records Prometheus metrics. The inner
//! result (value or error) is returned exactly as received.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::adapters::metrics::MetricsRegistry;
use crate::domain::{FetchError, HealthStatus, PriceQuote, RequestContext};
use crate::ports::FetchService;

pub const OP_FETCH_PRICE: &str = "fetch_price";
pub const OP_CHECK_HEALTH: &str = "check_health";

/// Metrics-recording `FetchService` decorator.
pub struct MetricsService<S> {
    /// Wrapped service.
    next: S,
    /// Prometheus sink, if metrics export is enabled.
    registry: Option<Arc<MetricsRegistry>>,
    /// Whether to print outcome summaries to stdout.
    console: bool,
}

impl<S: FetchService> MetricsService<S> {
    /// Wrap `next` with console output on and no Prometheus sink.
    pub fn new(next: S) -> Self {
        Self {
            next,
            registry: None,
            console: true,
        }
    }

    /// Record into the given Prometheus registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<MetricsRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Enable or disable console summaries.
    #[must_use]
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    fn record(&self, operation: &str, outcome: Result<(), &FetchError>, took: Duration) {
        if let Some(registry) = &self.registry {
            let label = outcome.err().map_or("ok", FetchError::kind);
            registry.observe(operation, label, took.as_secs_f64());
        }
    }

    fn print(&self, lines: &[String]) {
        if self.console {
            for line in lines {
                println!("{line}");
            }
        }
    }
}

/// Console summary for a finished price fetch.
pub fn price_summary(ticker: &str, result: &Result<PriceQuote, FetchError>, took: Duration) -> Vec<String> {
    let mut lines = match result {
        Ok(quote) => vec![
            format!("Successfully fetched price for ticker {ticker}:"),
            format!("Price: {:.6}", quote.price),
            format!("24-Hour Volume: {:.6}", quote.vol_24hr),
            format!("Price Timestamp: {}", quote.timestamp),
        ],
        Err(e) => vec![format!("Error fetching price for ticker {ticker}: {e}")],
    };
    lines.push(format!("Took: {took:?}"));
    lines
}

/// Console summary for a finished health check.
pub fn health_summary(result: &Result<HealthStatus, FetchError>, took: Duration) -> Vec<String> {
    let mut lines = match result {
        Ok(health) => vec![
            "Successfully fetched status for Gecko API".to_string(),
            format!("Status: {}", health.status),
            format!("Gecko Status: {}", health.upstream_status),
            format!("Check Status Timestamp: {}", health.timestamp),
        ],
        Err(e) => vec![format!("Error getting status for Gecko API: {e}")],
    };
    lines.push(format!("Took: {took:?}"));
    lines
}

#[async_trait]
impl<S: FetchService> FetchService for MetricsService<S> {
    async fn fetch_price(&self, ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError> {
        let started = Instant::now();
        let result = self.next.fetch_price(ctx, ticker).await;
        let took = started.elapsed();

        self.record(OP_FETCH_PRICE, result.as_ref().map(|_| ()), took);
        self.print(&price_summary(ticker, &result, took));

        result
    }

    async fn check_health(&self, ctx: &RequestContext) -> Result<HealthStatus, FetchError> {
        let started = Instant::now();
        let result = self.next.check_health(ctx).await;
        let took = started.elapsed();

        self.record(OP_CHECK_HEALTH, result.as_ref().map(|_| ()), took);
        if let (Some(registry), Ok(health)) = (&self.registry, &result) {
            registry
                .upstream_up
                .set(if health.status.is_running() { 1.0 } else { 0.0 });
        }
        self.print(&health_summary(&result, took));

        result
    }
}
