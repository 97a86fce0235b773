//! CoinGecko Fetch Service - FetchService Port Implementation
//!
//! The innermost layer of the request pipeline. Turns the raw client
//! tuples into domain values; errors pass through untouched.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::CoinGeckoClient;
use crate::domain::{FetchError, HealthStatus, PriceQuote, RequestContext};
use crate::ports::FetchService;

/// `FetchService` backed directly by the CoinGecko REST API.
pub struct CoinGeckoService {
    client: Arc<CoinGeckoClient>,
}

impl CoinGeckoService {
    pub fn new(client: Arc<CoinGeckoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchService for CoinGeckoService {
    async fn fetch_price(&self, _ctx: &RequestContext, ticker: &str) -> Result<PriceQuote, FetchError> {
        let (price, vol_24hr, timestamp) = self.client.fetch_price(ticker).await?;
        Ok(PriceQuote::new(ticker, price, vol_24hr, timestamp))
    }

    async fn check_health(&self, _ctx: &RequestContext) -> Result<HealthStatus, FetchError> {
        let (status, upstream_status, timestamp) = self.client.check_health().await?;
        Ok(HealthStatus {
            status,
            upstream_status,
            timestamp,
        })
    }
}
