//! Logging Decorator - Structured Request Logs
//!
//! Wraps any `FetchService` and emits one structured tracing event per
//! call: correlation id, elapsed time and the outcome. Forwards the
//! inner result unchanged.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{FetchError, HealthStatus, PriceQuote, RequestContext};
use crate::ports::FetchService;

/// Request-logging `FetchService` decorator.
pub struct LogService<S> {
    next: S,
}

impl<S: FetchService> LogService<S> {
    pub const fn new(next: S) -> Self {
        Self { next }
    }
}

#[async_trait]
impl<S: FetchService> FetchService for LogService<S> {
    async fn fetch_price(&self, ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError> {
        let begin = Instant::now();
        let result = self.next.fetch_price(ctx, ticker).await;
        let took_ms = begin.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(quote) => info!(
                request_id = ctx.request_id,
                took_ms,
                ticker,
                price = quote.price,
                vol_24hr = quote.vol_24hr,
                timestamp = %quote.timestamp,
                "fetchPrice"
            ),
            Err(e) => warn!(
                request_id = ctx.request_id,
                took_ms,
                ticker,
                error = %e,
                kind = e.kind(),
                "fetchPrice"
            ),
        }

        result
    }

    async fn check_health(&self, ctx: &RequestContext) -> Result<HealthStatus, FetchError> {
        let begin = Instant::now();
        let result = self.next.check_health(ctx).await;
        let took_ms = begin.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(health) => info!(
                request_id = ctx.request_id,
                took_ms,
                status = %health.status,
                gecko_status = %health.upstream_status,
                timestamp = %health.timestamp,
                "checkHealth"
            ),
            Err(e) => warn!(
                request_id = ctx.request_id,
                took_ms,
                error = %e,
                kind = e.kind(),
                "checkHealth"
            ),
        }

        result
    }
}
