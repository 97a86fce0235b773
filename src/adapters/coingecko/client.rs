//! CoinGecko HTTP Client - Upstream REST Calls
//!
//! Wraps reqwest with a bounded timeout for the two CoinGecko
//! endpoints the service proxies. One call per request, no retries.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, SubsecRound, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{PingResponse, SimplePriceResponse};
use crate::domain::{FetchError, ServiceStatus};

/// Public CoinGecko v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest upstream body accepted (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration for the CoinGecko HTTP client.
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
  /// Base URL for the API (without trailing slash).
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Upstream bodies larger than this fail with a decode error.
  pub max_body_bytes: usize,
}

impl Default for CoinGeckoConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout: DEFAULT_TIMEOUT,
      max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    }
  }
}

/// HTTP client for the CoinGecko REST API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: CoinGeckoConfig,
}

impl CoinGeckoClient {
  /// Create a new CoinGecko client.
  pub fn new(config: CoinGeckoConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .user_agent(concat!("coin-fetcher/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  /// Base URL this client talks to.
  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  /// Fetch USD price, 24h volume and last update time for one ticker.
  ///
  /// Calls GET /simple/price?ids={ticker}&vs_currencies=usd&...
  pub async fn fetch_price(&self, ticker: &str) -> Result<(f64, f64, DateTime<Utc>), FetchError> {
    let data: SimplePriceResponse = self
      .get_json(
        "/simple/price",
        &[
          ("ids", ticker),
          ("vs_currencies", "usd"),
          ("include_24hr_vol", "true"),
          ("include_last_updated_at", "true"),
        ],
      )
      .await?;

    let entry = data
      .get(ticker)
      .ok_or_else(|| FetchError::NotFound(ticker.to_string()))?;

    let secs = entry.last_updated_secs();
    let timestamp = DateTime::from_timestamp(secs, 0)
      .ok_or_else(|| FetchError::Decode(format!("last_updated_at out of range: {secs}")))?;

    debug!(ticker, price = entry.price(), "Price fetched from CoinGecko");

    Ok((entry.price(), entry.vol_24hr(), timestamp))
  }

  /// Ping the upstream.
  ///
  /// Returns the derived status, the raw ping message and the time of the
  /// check (whole seconds, UTC).
  pub async fn check_health(&self) -> Result<(ServiceStatus, String, DateTime<Utc>), FetchError> {
    let ping: PingResponse = self.get_json("/ping", &[]).await?;

    let raw = ping.status_message();
    let status = ServiceStatus::from_upstream(&raw);

    Ok((status, raw, Utc::now().trunc_subsecs(0)))
  }

  /// Execute a GET and decode a 200 JSON body.
  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<T, FetchError> {
    let url = format!("{}{}", self.config.base_url, path);

    let response = self.http.get(&url).query(query).send().await.map_err(|e| {
      warn!(error = %e, path, "CoinGecko request failed");
      FetchError::Network(e)
    })?;

    let status = response.status();
    if status != StatusCode::OK {
      warn!(status = %status, path, "CoinGecko returned non-OK status");
      return Err(FetchError::UpstreamStatus(status.as_u16()));
    }

    let body = self.read_body(response, path).await?;
    Ok(serde_json::from_slice(&body)?)
  }

  /// Read the body chunk by chunk, giving up once it passes the size cap.
  async fn read_body(&self, mut response: reqwest::Response, path: &str) -> Result<Vec<u8>, FetchError> {
    let limit = self.config.max_body_bytes;
    let too_large = |path: &str| {
      warn!(path, limit, "CoinGecko response body too large");
      FetchError::Decode(format!("response body exceeds {limit} bytes"))
    };

    if response.content_length().is_some_and(|len| len > limit as u64) {
      return Err(too_large(path));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
      if body.len() + chunk.len() > limit {
        return Err(too_large(path));
      }
      body.extend_from_slice(&chunk);
    }

    Ok(body)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[test]
  fn test_default_config() {
    let config = CoinGeckoConfig::default();
    assert_eq!(config.base_url, "https://api.coingecko.com/api/v3");
    assert_eq!(config.timeout, Duration::from_secs(10));
  }

  #[tokio::test]
  async fn test_unreachable_upstream_is_network_error() {
    let client = CoinGeckoClient::new(CoinGeckoConfig {
      base_url: "http://127.0.0.1:1".to_string(),
      timeout: Duration::from_secs(2),
      ..CoinGeckoConfig::default()
    })
    .unwrap();

    let err = client.check_health().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
  }

  #[tokio::test]
  async fn test_oversized_body_is_decode_error() {
    let upstream = MockServer::start().await;
    let padding = "x".repeat(4096);
    Mock::given(method("GET"))
      .and(path("/ping"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"gecko_says": padding})),
      )
      .mount(&upstream)
      .await;

    let client = CoinGeckoClient::new(CoinGeckoConfig {
      base_url: upstream.uri(),
      max_body_bytes: 1024,
      ..CoinGeckoConfig::default()
    })
    .unwrap();

    let err = client.check_health().await.unwrap_err();
    assert_eq!(err.to_string(), "failed to decode JSON response: response body exceeds 1024 bytes");

    let roomy = CoinGeckoClient::new(CoinGeckoConfig {
      base_url: upstream.uri(),
      ..CoinGeckoConfig::default()
    })
    .unwrap();
    let (_, raw, _) = roomy.check_health().await.unwrap();
    assert_eq!(raw.len(), 4096);
  }
}
