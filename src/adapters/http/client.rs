//! JSON API Client - Typed Client for This Service
//!
//! Consumes the `/v1/price` and `/v1/health` endpoints of a running
//! coin-fetcher instance. Non-OK answers are decoded from the
//! `{"error": ...}` body and surfaced as errors.

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{ErrorResponse, HealthResponse, PriceResponse};

/// Client for the local JSON API.
#[derive(Debug, Clone)]
pub struct PriceClient {
  /// Underlying HTTP client.
  http: Client,
  /// Service root, e.g. `http://localhost:9899`.
  endpoint: String,
}

impl PriceClient {
  /// Create a new client for the service at `endpoint`.
  pub fn new(endpoint: impl Into<String>) -> Self {
    Self {
      http: Client::new(),
      endpoint: endpoint.into().trim_end_matches('/').to_string(),
    }
  }

  /// Fetch the price quote for `ticker`.
  pub async fn fetch_price(&self, ticker: &str) -> Result<PriceResponse> {
    let url = format!("{}/v1/price", self.endpoint);
    let response = self
      .http
      .get(&url)
      .query(&[("ticker", ticker)])
      .send()
      .await
      .with_context(|| format!("Failed to reach {url}"))?;

    Self::decode(response).await
  }

  /// Fetch the upstream health as reported by the service.
  pub async fn check_health(&self) -> Result<HealthResponse> {
    let url = format!("{}/v1/health", self.endpoint);
    let response = self
      .http
      .get(&url)
      .send()
      .await
      .with_context(|| format!("Failed to reach {url}"))?;

    Self::decode(response).await
  }

  async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    debug!(status = %status, "Service responded");

    if status != StatusCode::OK {
      let body: ErrorResponse = response
        .json()
        .await
        .context("Failed to parse error response")?;
      anyhow::bail!(
        "service responded with non-OK status code {}: {}",
        status.as_u16(),
        body.error
      );
    }

    response
      .json()
      .await
      .context("Failed to parse service response")
  }
}
