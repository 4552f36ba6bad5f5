//! Configuration Module - Settings and Exchange Credentials
//!
//! Two inputs configure the bot:
//! - an optional TOML settings file (`AppConfig`) for endpoints and
//!   trading tunables, every field defaulted;
//! - a required JSON credentials file (`Credentials`) holding the
//!   exchange API key, secret and passphrase.
//!
//! The per-listing budget comes from the command line and is not part
//! of either file.

pub mod loader;

use std::fmt;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::order_intent::DEFAULT_MARKUP;

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Exchange REST endpoint settings.
  #[serde(default)]
  pub api: ApiConfig,
  /// Listing detection and order sizing settings.
  #[serde(default)]
  pub trading: TradingConfig,
}

/// Exchange REST endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// REST API base URL.
  #[serde(default = "default_rest_url")]
  pub rest_url: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

impl ApiConfig {
  /// Request timeout as a `Duration`.
  pub const fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_seconds)
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      rest_url: default_rest_url(),
      timeout_seconds: default_timeout(),
    }
  }
}

/// Listing detection and order sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
  /// Quote currency new listings must trade against.
  #[serde(default = "default_settlement_currency")]
  pub settlement_currency: String,
  /// Markup over the ticker price for the limit price (0.01 = 1%).
  #[serde(default = "default_markup")]
  pub markup: Decimal,
  /// Submission attempts per order, including the first.
  #[serde(default = "default_max_order_attempts")]
  pub max_order_attempts: u32,
  /// Pause between polls (milliseconds).
  #[serde(default = "default_poll_interval")]
  pub poll_interval_ms: u64,
}

impl TradingConfig {
  /// Poll pacing as a `Duration`.
  pub const fn poll_interval(&self) -> Duration {
    Duration::from_millis(self.poll_interval_ms)
  }
}

impl Default for TradingConfig {
  fn default() -> Self {
    Self {
      settlement_currency: default_settlement_currency(),
      markup: default_markup(),
      max_order_attempts: default_max_order_attempts(),
      poll_interval_ms: default_poll_interval(),
    }
  }
}

/// Exchange API credentials, as stored in the keys file.
#[derive(Clone, Deserialize)]
pub struct Credentials {
  /// API key.
  #[serde(rename = "coinbase_pro_api_key")]
  pub api_key: String,
  /// Base64-encoded API secret (never sent over the wire).
  #[serde(rename = "coinbase_pro_api_secret_key")]
  pub api_secret: String,
  /// API passphrase.
  #[serde(rename = "coinbase_api_pro_passphrase")]
  pub passphrase: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("api_key", &self.api_key)
      .field("api_secret", &"<redacted>")
      .field("passphrase", &"<redacted>")
      .finish()
  }
}

// Default value functions for serde

fn default_rest_url() -> String {
  "https://api.exchange.coinbase.com".to_string()
}

const fn default_timeout() -> u64 {
  10
}

fn default_settlement_currency() -> String {
  "USD".to_string()
}

const fn default_markup() -> Decimal {
  DEFAULT_MARKUP
}

const fn default_max_order_attempts() -> u32 {
  6
}

const fn default_poll_interval() -> u64 {
  1_000
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_defaults_match_documented_behavior() {
    let config = AppConfig::default();
    assert_eq!(config.api.rest_url, "https://api.exchange.coinbase.com");
    assert_eq!(config.trading.settlement_currency, "USD");
    assert_eq!(config.trading.markup, dec!(0.01));
    assert_eq!(config.trading.max_order_attempts, 6);
    assert_eq!(config.trading.poll_interval(), Duration::from_secs(1));
  }

  #[test]
  fn test_credentials_debug_redacts_secrets() {
    let creds = Credentials {
      api_key: "key".into(),
      api_secret: "c2VjcmV0".into(),
      passphrase: "pass".into(),
    };
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("key"));
    assert!(!rendered.contains("c2VjcmV0"));
    assert!(!rendered.contains("pass\""));
  }
}
