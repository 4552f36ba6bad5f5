//! Configuration Loader - File Loading and Validation
//!
//! Loads the optional TOML settings file and the required JSON
//! credentials file, validating both before the bot touches the
//! exchange. Every failure here is a `ConfigError` and aborts startup.

use std::path::Path;

use base64::Engine;
use rust_decimal::Decimal;
use tracing::info;

use super::{AppConfig, Credentials};
use crate::error::ConfigError;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns `ConfigError` if the file can't be read, TOML parsing fails,
/// or a validation rule is violated.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
  let path = path.as_ref();
  let content = read(path)?;

  let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
    path: path.display().to_string(),
    message: e.to_string(),
  })?;

  validate_config(&config)?;

  info!(
    rest_url = %config.api.rest_url,
    currency = %config.trading.settlement_currency,
    markup = %config.trading.markup,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Load exchange credentials from a JSON keys file.
///
/// All three fields are required and must be non-empty; the secret must
/// be valid base64 because it is decoded into the HMAC key.
///
/// # Errors
/// Returns `ConfigError` for a missing file, malformed JSON, a missing
/// field or an unusable secret.
pub fn load_credentials(path: impl AsRef<Path>) -> Result<Credentials, ConfigError> {
  let path = path.as_ref();
  let content = read(path)?;

  let credentials: Credentials =
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.display().to_string(),
      message: e.to_string(),
    })?;

  validate_credentials(&credentials)?;
  Ok(credentials)
}

/// Validate all configuration parameters.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
  ensure(
    !config.api.rest_url.trim().is_empty(),
    "api.rest_url must not be empty",
  )?;
  ensure(
    config.api.timeout_seconds > 0,
    "api.timeout_seconds must be positive",
  )?;
  ensure(
    !config.trading.settlement_currency.trim().is_empty(),
    "trading.settlement_currency must not be empty",
  )?;
  ensure(
    config.trading.markup >= Decimal::ZERO,
    format!("trading.markup must be >= 0, got {}", config.trading.markup),
  )?;
  ensure(
    config.trading.max_order_attempts >= 1,
    "trading.max_order_attempts must be at least 1",
  )?;
  Ok(())
}

fn validate_credentials(credentials: &Credentials) -> Result<(), ConfigError> {
  ensure(
    !credentials.api_key.trim().is_empty(),
    "coinbase_pro_api_key must not be empty",
  )?;
  ensure(
    !credentials.api_secret.trim().is_empty(),
    "coinbase_pro_api_secret_key must not be empty",
  )?;
  ensure(
    !credentials.passphrase.is_empty(),
    "coinbase_api_pro_passphrase must not be empty",
  )?;
  base64::engine::general_purpose::STANDARD
    .decode(credentials.api_secret.trim())
    .map_err(|e| {
      ConfigError::Invalid(format!("coinbase_pro_api_secret_key is not valid base64: {e}"))
    })?;
  Ok(())
}

fn read(path: &Path) -> Result<String, ConfigError> {
  std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.display().to_string(),
    source,
  })
}

fn ensure(condition: bool, message: impl Into<String>) -> Result<(), ConfigError> {
  if condition {
    Ok(())
  } else {
    Err(ConfigError::Invalid(message.into()))
  }
}
