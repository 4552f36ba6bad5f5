//! Coinbase HTTP Client - Public and Signed REST Calls
//!
//! Wraps reqwest with the exchange's authentication headers and typed
//! JSON decoding. One attempt per call; retries are decided by the
//! use cases.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::auth::{
  CoinbaseAuth, HEADER_KEY, HEADER_PASSPHRASE, HEADER_SIGN, HEADER_TIMESTAMP,
};
use super::types::ApiErrorBody;
use crate::error::TransportError;

/// Configuration for the Coinbase HTTP client.
#[derive(Debug, Clone)]
pub struct CoinbaseClientConfig {
  /// Base URL for the REST API.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
}

impl Default for CoinbaseClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://api.exchange.coinbase.com".to_string(),
      timeout: Duration::from_secs(10),
    }
  }
}

/// HTTP client for the Coinbase Exchange REST API.
pub struct CoinbaseClient {
  /// Underlying HTTP client.
  http: Client,
  /// Request signer for private endpoints.
  auth: CoinbaseAuth,
  /// Client configuration.
  config: CoinbaseClientConfig,
}

impl CoinbaseClient {
  /// Create a new client.
  ///
  /// # Errors
  /// Fails if the TLS backend cannot be initialised.
  pub fn new(auth: CoinbaseAuth, config: CoinbaseClientConfig) -> Result<Self, TransportError> {
    let http = Client::builder()
      .timeout(config.timeout)
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self { http, auth, config })
  }

  /// Unauthenticated GET (product list, tickers).
  pub async fn public_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
    let request = self.http.get(self.url(path));
    self.execute(request, "GET", path).await
  }

  /// Signed GET (accounts, fees).
  pub async fn private_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
    let request = self.signed(self.http.get(self.url(path)), "GET", path, "");
    self.execute(request, "GET", path).await
  }

  /// Signed POST with a JSON body (orders).
  pub async fn private_post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
  where
    B: Serialize + Sync,
    T: DeserializeOwned,
  {
    let body = serde_json::to_string(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    let request = self
      .http
      .post(self.url(path))
      .header("Content-Type", "application/json");
    let request = self.signed(request, "POST", path, &body).body(body);
    self.execute(request, "POST", path).await
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn signed(&self, request: RequestBuilder, method: &str, path: &str, body: &str) -> RequestBuilder {
    let headers = self.auth.auth_headers(method, path, body);
    request
      .header(HEADER_KEY, headers.key)
      .header(HEADER_SIGN, headers.signature)
      .header(HEADER_TIMESTAMP, headers.timestamp)
      .header(HEADER_PASSPHRASE, headers.passphrase)
  }

  /// Send once, map non-success statuses, decode the body.
  async fn execute<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
    method: &str,
    path: &str,
  ) -> Result<T, TransportError> {
    let response = request.send().await.inspect_err(|e| {
      warn!(method, path, error = %e, "Request failed");
    })?;

    let status = response.status();
    let body = response.text().await?;
    debug!(method, path, status = status.as_u16(), bytes = body.len(), "Response received");

    if !status.is_success() {
      return Err(TransportError::Status {
        status: status.as_u16(),
        message: error_message(&body),
      });
    }

    serde_json::from_str(&body).map_err(|e| TransportError::Decode(format!("{path}: {e}")))
  }
}

/// Prefer the exchange's `{"message": ..}` body, fall back to the raw text.
fn error_message(body: &str) -> String {
  serde_json::from_str::<ApiErrorBody>(body)
    .map(|e| e.message)
    .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Credentials;

  fn client(base_url: &str) -> CoinbaseClient {
    let auth = CoinbaseAuth::new(&Credentials {
      api_key: "key".into(),
      api_secret: "c2VjcmV0".into(),
      passphrase: "pass".into(),
    })
    .unwrap();
    CoinbaseClient::new(
      auth,
      CoinbaseClientConfig {
        base_url: base_url.to_string(),
        ..CoinbaseClientConfig::default()
      },
    )
    .unwrap()
  }

  #[test]
  fn test_url_joins_without_double_slash() {
    assert_eq!(
      client("https://example.test/").url("/products"),
      "https://example.test/products"
    );
  }

  #[test]
  fn test_error_message_prefers_json_message() {
    assert_eq!(error_message(r#"{"message":"NotFound"}"#), "NotFound");
    assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
  }
}
