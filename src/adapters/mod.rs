//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, tracing subscriber, files).
//!
//! Adapter categories:
//! - `coinbase`: Coinbase Exchange REST client, auth and gateway
//! - `logging`: Session log file, subscriber setup and message sink

pub mod coinbase;
pub mod logging;
