//! Listing Monitor - Polling Loop Driver
//!
//! Owns the known-assets snapshot and drives the detection cycle:
//! fetch catalog -> diff against the snapshot -> buy each new listing.
//!
//! Lifecycle:
//! - `start`: fetch the maker fee rate and seed the snapshot (fatal on error)
//! - `poll_once`: one detection cycle, never fails
//! - `run`: `poll_once` forever with a fixed pause after each cycle

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use super::trade_executor::{ExecutorConfig, TradeExecutor};
use crate::config::AppConfig;
use crate::domain::differ::new_listings;
use crate::domain::listing::{Catalog, ProductId};
use crate::domain::trade::TradeOutcome;
use crate::error::TransportError;
use crate::ports::exchange::ExchangeGateway;
use crate::ports::message_sink::MessageSink;

/// Monitor settings.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
  /// Settlement currency to spend per new listing.
  pub budget: Decimal,
  /// Pause after each cycle, measured from the end of its work.
  pub poll_interval: Duration,
  /// Per-trade settings.
  pub executor: ExecutorConfig,
}

impl MonitorConfig {
  /// Combine the loaded configuration with the per-listing budget.
  pub fn new(config: &AppConfig, budget: Decimal) -> Self {
    Self {
      budget,
      poll_interval: config.trading.poll_interval(),
      executor: ExecutorConfig::from(&config.trading),
    }
  }
}

/// Result of one detection cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollReport {
  /// The catalog could not be fetched; the snapshot is unchanged.
  FetchFailed,
  /// No new listings.
  Unchanged,
  /// New listings were found and processed.
  NewListings {
    /// Newly discovered product IDs, ascending.
    discovered: Vec<ProductId>,
    /// Outcome per processed product, in processing order.
    outcomes: Vec<(ProductId, TradeOutcome)>,
    /// True if a balance shortfall stopped the batch early.
    halted: bool,
  },
}

/// Drives listing detection and trading.
pub struct ListingMonitor<G: ExchangeGateway, S: MessageSink> {
  /// Exchange port.
  gateway: Arc<G>,
  /// Operator output.
  sink: Arc<S>,
  /// Buys individual listings.
  executor: TradeExecutor<G, S>,
  /// Last catalog in which new listings were seen (or the seed).
  known: Catalog,
  /// Maker fee rate fetched at startup.
  fee_rate: Decimal,
  /// Settings.
  config: MonitorConfig,
}

impl<G: ExchangeGateway, S: MessageSink> ListingMonitor<G, S> {
  /// Fetch the fee rate and the seed catalog.
  ///
  /// # Errors
  /// Any exchange failure here is returned; the caller treats it as fatal.
  pub async fn start(
    gateway: Arc<G>,
    sink: Arc<S>,
    config: MonitorConfig,
  ) -> Result<Self, TransportError> {
    let fee_rate = gateway.fetch_maker_fee_rate().await?;
    let known = gateway.fetch_catalog().await?;

    info!(
      fee_rate = %fee_rate,
      listings = known.len(),
      budget = %config.budget,
      "Listing monitor seeded"
    );
    sink.emit("Continuously sampling CoinbasePro cryptocurrency list to find new tokens ...");

    let executor = TradeExecutor::new(
      Arc::clone(&gateway),
      Arc::clone(&sink),
      config.executor.clone(),
    );

    Ok(Self {
      gateway,
      sink,
      executor,
      known,
      fee_rate,
      config,
    })
  }

  /// Current known-assets snapshot.
  pub const fn known(&self) -> &Catalog {
    &self.known
  }

  /// Maker fee rate in use.
  pub const fn fee_rate(&self) -> Decimal {
    self.fee_rate
  }

  /// Run one detection cycle; `now` stamps the discovery message.
  #[instrument(skip(self, now))]
  pub async fn poll_once(&mut self, now: DateTime<Utc>) -> PollReport {
    let current = match self.gateway.fetch_catalog().await {
      Ok(catalog) => catalog,
      Err(e) => {
        self.sink.emit(&format!(
          "ERROR: Could not gather current Coinbase cryptocurrency list - {e}."
        ));
        return PollReport::FetchFailed;
      }
    };

    let discovered = new_listings(&self.known, &current);
    if discovered.is_empty() {
      debug!(listings = current.len(), "No new listings");
      return PollReport::Unchanged;
    }

    self.known = current;
    self.sink.emit(&format!(
      "Found new listed cryptocurrencies: {}, at time: {now}",
      discovered.join(", ")
    ));

    let mut outcomes = Vec::with_capacity(discovered.len());
    let mut halted = false;

    for product_id in &discovered {
      let Some(&precisions) = self.known.get(product_id) else {
        continue;
      };
      let outcome = self
        .executor
        .execute(product_id, precisions, self.config.budget, self.fee_rate)
        .await;
      let stop = outcome.halts_batch();
      outcomes.push((product_id.clone(), outcome));
      if stop {
        halted = true;
        break;
      }
    }

    if halted {
      info!(
        skipped = discovered.len() - outcomes.len(),
        "Balance exhausted, remaining new listings left for this cycle"
      );
    }

    PollReport::NewListings {
      discovered,
      outcomes,
      halted,
    }
  }

  /// Poll forever. Returns only if the task is cancelled.
  pub async fn run(mut self) {
    loop {
      self.poll_once(Utc::now()).await;
      tokio::time::sleep(self.config.poll_interval).await;
    }
  }
}
