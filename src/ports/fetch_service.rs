//! Fetch Service Port - Price and Health Capability
//!
//! Defines the two-method capability every layer of the request
//! pipeline implements: the CoinGecko-backed service at the bottom and
//! each decorator wrapped around it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{FetchError, HealthStatus, PriceQuote, RequestContext};

/// Trait for price and upstream-health providers.
///
/// Decorators wrap an inner `FetchService` and must forward its result
/// unchanged, so any stack of them behaves like the innermost service.
#[async_trait]
pub trait FetchService: Send + Sync {
  /// Fetch the current USD price and 24h volume for one ticker.
  ///
  /// # Errors
  /// Returns `FetchError::NotFound` when the upstream has no entry for
  /// the ticker, and the other variants on transport/decoding failures.
  async fn fetch_price(&self, ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError>;

  /// Ping the upstream and report whether it is running.
  async fn check_health(&self, ctx: &RequestContext) -> Result<HealthStatus, FetchError>;
}

#[async_trait]
impl<T: FetchService + ?Sized> FetchService for Arc<T> {
  async fn fetch_price(&self, ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError> {
    (**self).fetch_price(ctx, ticker).await
  }

  async fn check_health(&self, ctx: &RequestContext) -> Result<HealthStatus, FetchError> {
    (**self).check_health(ctx).await
  }
}

#[async_trait]
impl<T: FetchService + ?Sized> FetchService for Box<T> {
  async fn fetch_price(&self, ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError> {
    (**self).fetch_price(ctx, ticker).await
  }

  async fn check_health(&self, ctx: &RequestContext) -> Result<HealthStatus, FetchError> {
    (**self).check_health(ctx).await
  }
}
