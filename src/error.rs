//! Error Taxonomy - Typed Failures at the Exchange and Config Seams
//!
//! `TransportError` covers everything that can go wrong while talking to
//! the exchange. `OrderError` wraps it for order submission, adding the
//! explicit rejection case. `ConfigError` is only ever produced at startup
//! and is always fatal.
//!
//! All variants implement `std::error::Error` via `thiserror`, so they
//! compose with `anyhow::Result` at the wiring layer.

use thiserror::Error;

/// Network, HTTP or payload failure while calling the exchange.
#[derive(Debug, Error)]
pub enum TransportError {
  /// Connection, TLS or timeout failure inside the HTTP client.
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The exchange answered with a non-success status.
  #[error("exchange returned {status}: {message}")]
  Status {
    /// HTTP status code.
    status: u16,
    /// Error message from the body, or the raw body.
    message: String,
  },

  /// The response body did not match the expected shape.
  #[error("decode error: {0}")]
  Decode(String),
}

impl TransportError {
  /// HTTP status of the failed call, if the exchange answered at all.
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// Failure to place a limit order.
#[derive(Debug, Error)]
pub enum OrderError {
  /// The exchange accepted the request but refused the order.
  #[error("order rejected: {0}")]
  Rejected(String),

  /// The submission never reached a verdict.
  #[error(transparent)]
  Transport(#[from] TransportError),
}

/// Missing or malformed startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// File could not be read.
  #[error("failed to read {path}: {source}")]
  Read {
    /// Path that was being read.
    path: String,
    /// Underlying I/O error.
    #[source]
    source: std::io::Error,
  },

  /// File was read but could not be parsed.
  #[error("failed to parse {path}: {message}")]
  Parse {
    /// Path that was being parsed.
    path: String,
    /// Parser message.
    message: String,
  },

  /// Parsed values violate a validation rule.
  #[error("invalid configuration: {0}")]
  Invalid(String),
}
