//! Coinbase Exchange REST Adapter
//!
//! Implements the `ExchangeGateway` port against the Coinbase Exchange
//! (formerly Coinbase Pro) REST API.
//!
//! Sub-modules:
//! - `auth`: HMAC-SHA256 request signing
//! - `client`: HTTP client for public and signed calls
//! - `gateway`: `ExchangeGateway` implementation
//! - `types`: API request/response type definitions

pub mod auth;
pub mod client;
pub mod gateway;
pub mod types;

pub use auth::CoinbaseAuth;
pub use client::{CoinbaseClient, CoinbaseClientConfig};
pub use gateway::CoinbaseGateway;
