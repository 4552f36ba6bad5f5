//! Coinbase Exchange Authentication — HMAC-SHA256 Request Signing
//!
//! Signs every private REST request. The prehash string is
//! `timestamp + METHOD + request_path + body`, the key is the
//! base64-decoded API secret, and the resulting MAC is sent base64
//! encoded in `CB-ACCESS-SIGN` alongside the key, timestamp and
//! passphrase headers.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;

use crate::config::Credentials;
use crate::error::ConfigError;

/// Header carrying the API key.
pub const HEADER_KEY: &str = "CB-ACCESS-KEY";
/// Header carrying the request signature.
pub const HEADER_SIGN: &str = "CB-ACCESS-SIGN";
/// Header carrying the signing timestamp (Unix seconds).
pub const HEADER_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
/// Header carrying the API passphrase.
pub const HEADER_PASSPHRASE: &str = "CB-ACCESS-PASSPHRASE";

/// Signed header set for one private request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
  /// API key.
  pub key: String,
  /// Unix timestamp used in the prehash.
  pub timestamp: String,
  /// Base64 HMAC signature.
  pub signature: String,
  /// API passphrase.
  pub passphrase: String,
}

/// Exchange API authentication handler.
///
/// Holds the decoded secret; the secret itself is never sent as a header,
/// only the computed signature.
pub struct CoinbaseAuth {
  api_key: String,
  secret: Vec<u8>,
  passphrase: String,
}

impl CoinbaseAuth {
  /// Build the signer from loaded credentials.
  ///
  /// # Errors
  /// Returns `ConfigError::Invalid` if the secret is not valid base64.
  pub fn new(credentials: &Credentials) -> Result<Self, ConfigError> {
    let secret = base64::engine::general_purpose::STANDARD
      .decode(credentials.api_secret.trim())
      .map_err(|e| ConfigError::Invalid(format!("API secret is not valid base64: {e}")))?;

    Ok(Self {
      api_key: credentials.api_key.clone(),
      secret,
      passphrase: credentials.passphrase.clone(),
    })
  }

  /// Get the API key for request headers.
  pub fn api_key(&self) -> &str {
    &self.api_key
  }

  /// Current Unix timestamp in seconds (for signing).
  pub fn timestamp() -> String {
    SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .unwrap_or_default()
      .as_secs()
      .to_string()
  }

  /// Sign a request.
  ///
  /// `path` must include the query string exactly as sent.
  pub fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> String {
    let message = format!("{timestamp}{}{path}{body}", method.to_ascii_uppercase());
    let mac = hmac_sha256::HMAC::mac(message.as_bytes(), &self.secret);
    base64::engine::general_purpose::STANDARD.encode(mac)
  }

  /// Build all authentication headers for a request signed now.
  pub fn auth_headers(&self, method: &str, path: &str, body: &str) -> AuthHeaders {
    let timestamp = Self::timestamp();
    let signature = self.sign(&timestamp, method, path, body);
    AuthHeaders {
      key: self.api_key.clone(),
      timestamp,
      signature,
      passphrase: self.passphrase.clone(),
    }
  }
}
