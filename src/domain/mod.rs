//! Domain layer - Core listing and sizing logic.
//!
//! Pure types and arithmetic for the listing sniper: catalog snapshots,
//! the snapshot differ, order sizing and trade outcomes. Nothing in
//! here performs I/O (hexagonal architecture inner ring).

pub mod differ;
pub mod listing;
pub mod order_intent;
pub mod trade;

// Re-export core types for convenience
pub use differ::{diff, new_listings};
pub use listing::{Catalog, Precisions, ProductId, TradingFlags};
pub use order_intent::OrderIntent;
pub use trade::{FailureReason, OrderId, SkipReason, TradeOutcome};
