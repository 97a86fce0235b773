//! Decorator Chain Benchmarks — Per-request Overhead
//!
//! Measures what the logging and metrics layers add on top of an
//! in-memory `FetchService`, i.e. the cost paid on every request before
//! the upstream round-trip.
//!
//! Run with: cargo bench --bench decorator_bench

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coin_fetcher::adapters::metrics::MetricsRegistry;
use coin_fetcher::domain::{FetchError, HealthStatus, PriceQuote, RequestContext};
use coin_fetcher::ports::FetchService;
use coin_fetcher::usecases::{LogService, MetricsService};

/// Answers instantly with a fixed quote.
struct InMemory;

#[async_trait]
impl FetchService for InMemory {
    async fn fetch_price(&self, _ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError> {
        Ok(PriceQuote::new(ticker, 43_000.0, 1.2e10, Utc::now()))
    }

    async fn check_health(&self, _ctx: &RequestContext) -> Result<HealthStatus, FetchError> {
        Ok(HealthStatus::from_upstream("(V3) To the Moon!", Utc::now()))
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime")
}

/// Baseline: the bare service.
fn bench_bare(c: &mut Criterion) {
    let rt = runtime();
    let svc = InMemory;
    let ctx = RequestContext::with_id(1);

    c.bench_function("fetch_price_bare", |b| {
        b.to_async(&rt)
            .iter(|| async { svc.fetch_price(&ctx, black_box("bitcoin")).await });
    });
}

/// Full chain as wired in production, console output off.
fn bench_full_chain(c: &mut Criterion) {
    let rt = runtime();
    let registry = Arc::new(MetricsRegistry::new().expect("metrics registry"));
    let svc = LogService::new(
        MetricsService::new(InMemory)
            .with_registry(registry)
            .with_console(false),
    );
    let ctx = RequestContext::with_id(1);

    c.bench_function("fetch_price_log_metrics", |b| {
        b.to_async(&rt)
            .iter(|| async { svc.fetch_price(&ctx, black_box("bitcoin")).await });
    });
}

criterion_group!(benches, bench_bare, bench_full_chain);
criterion_main!(benches);
