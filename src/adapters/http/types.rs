//! JSON API Request/Response Types
//!
//! Wire contract of the local API. Field names are part of the public
//! contract (`vol24Hr`, `geckoApiStatus`) and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{HealthStatus, PriceQuote};

/// `GET /v1/price` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
  /// Ticker as requested.
  pub ticker: String,
  /// Price in USD.
  pub price: f64,
  /// Upstream last-update time (RFC 3339).
  pub timestamp: DateTime<Utc>,
  /// 24h volume in USD.
  #[serde(rename = "vol24Hr")]
  pub vol_24hr: f64,
}

impl From<PriceQuote> for PriceResponse {
  fn from(quote: PriceQuote) -> Self {
    Self {
      ticker: quote.ticker,
      price: quote.price,
      timestamp: quote.timestamp,
      vol_24hr: quote.vol_24hr,
    }
  }
}

/// `GET /v1/health` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
  /// "Running" or "Not Running".
  pub status: String,
  /// Raw upstream ping message.
  #[serde(rename = "geckoApiStatus")]
  pub gecko_api_status: String,
  /// Time of the check (RFC 3339).
  pub timestamp: DateTime<Utc>,
}

impl From<HealthStatus> for HealthResponse {
  fn from(health: HealthStatus) -> Self {
    Self {
      status: health.status.to_string(),
      gecko_api_status: health.upstream_status,
      timestamp: health.timestamp,
    }
  }
}

/// Body of every 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
}

/// Query string of `GET /v1/price`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceQuery {
  pub ticker: Option<String>,
}

impl PriceQuery {
  /// Build from decoded `key=value` pairs. A repeated `ticker` keeps its
  /// first value; unknown keys are ignored.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let ticker = pairs
      .into_iter()
      .find_map(|(key, value)| (key == "ticker").then_some(value));

    Self { ticker }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  use crate::domain::ServiceStatus;

  #[test]
  fn test_price_response_field_names() {
    let quote = PriceQuote::new("bitcoin", 42.0, 7.5, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let json = serde_json::to_value(PriceResponse::from(quote)).unwrap();

    assert_eq!(json["ticker"], "bitcoin");
    assert_eq!(json["price"], 42.0);
    assert_eq!(json["vol24Hr"], 7.5);
    assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
  }

  #[test]
  fn test_health_response_field_names() {
    let health = HealthStatus {
      status: ServiceStatus::NotRunning,
      upstream_status: String::new(),
      timestamp: Utc.timestamp_opt(0, 0).unwrap(),
    };
    let json = serde_json::to_value(HealthResponse::from(health)).unwrap();

    assert_eq!(json["status"], "Not Running");
    assert_eq!(json["geckoApiStatus"], "");
    assert!(json.get("upstream_status").is_none());
  }

  #[test]
  fn test_price_query_takes_first_ticker() {
    let pairs = vec![
      ("vs".to_string(), "usd".to_string()),
      ("ticker".to_string(), "bitcoin".to_string()),
      ("ticker".to_string(), "ethereum".to_string()),
    ];
    assert_eq!(PriceQuery::from_pairs(pairs).ticker.as_deref(), Some("bitcoin"));
    assert_eq!(PriceQuery::from_pairs(Vec::new()), PriceQuery::default());
  }
}
