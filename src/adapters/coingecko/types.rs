//! CoinGecko API Response Types
//!
//! Deserialization targets for the two upstream endpoints we call.
//! Values are decoded into per-call locals; nothing here is shared
//! between requests.

use std::collections::HashMap;

use serde::Deserialize;

/// One entry of the `/simple/price` mapping.
///
/// The upstream omits or nulls fields it has no data for, so every field
/// is optional and read through the accessors (missing = 0).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimplePrice {
  /// Price in USD.
  pub usd: Option<f64>,
  /// 24h traded volume in USD.
  pub usd_24h_vol: Option<f64>,
  /// Last update time (Unix seconds).
  pub last_updated_at: Option<i64>,
}

impl SimplePrice {
  pub fn price(&self) -> f64 {
    self.usd.unwrap_or_default()
  }

  pub fn vol_24hr(&self) -> f64 {
    self.usd_24h_vol.unwrap_or_default()
  }

  pub fn last_updated_secs(&self) -> i64 {
    self.last_updated_at.unwrap_or_default()
  }
}

/// Full `/simple/price` body: coin id -> price entry.
pub type SimplePriceResponse = HashMap<String, SimplePrice>;

/// `/ping` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PingResponse {
  /// Free-form status message, e.g. "(V3) To the Moon!".
  pub gecko_says: Option<String>,
}

impl PingResponse {
  /// Raw status message, empty when the field is missing.
  pub fn status_message(self) -> String {
    self.gecko_says.unwrap_or_default()
  }
}
