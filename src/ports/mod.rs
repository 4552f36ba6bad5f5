//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases require from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ExchangeGateway`: Product catalog, prices, balances and orders
//! - `MessageSink`: Operator-facing output (stdout + session log)

pub mod exchange;
pub mod message_sink;

pub use exchange::{ExchangeGateway, OrderHandle};
pub use message_sink::MessageSink;
