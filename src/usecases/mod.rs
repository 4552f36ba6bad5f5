//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! bot's workflows.
//!
//! Use cases:
//! - `ListingMonitor`: Polling loop, snapshot diffing, batch control
//! - `TradeExecutor`: Sizing, balance gate and bounded-retry buy for one listing

pub mod listing_monitor;
pub mod trade_executor;

pub use listing_monitor::{ListingMonitor, MonitorConfig, PollReport};
pub use trade_executor::{ExecutorConfig, TradeExecutor};
