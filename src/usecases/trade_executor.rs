//! Trade Executor - Buy One Newly Listed Product
//!
//! For a single new listing:
//! - fetch the ticker price (skip if the product has none yet)
//! - size a marked-up limit buy within the per-listing budget
//! - check the fresh settlement balance covers cost plus maker fee
//! - submit with a bounded number of immediate retries
//!
//! Every path ends with exactly one operator message and one
//! `TradeOutcome`.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::config::TradingConfig;
use crate::domain::listing::{Precisions, ProductId};
use crate::domain::order_intent::OrderIntent;
use crate::domain::trade::{FailureReason, SkipReason, TradeOutcome};
use crate::error::OrderError;
use crate::ports::exchange::{ExchangeGateway, OrderHandle};
use crate::ports::message_sink::MessageSink;

/// Executor settings.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
  /// Currency the balance is checked and spent in.
  pub settlement_currency: String,
  /// Markup over the ticker price (0.01 = 1%).
  pub markup: Decimal,
  /// Submission attempts per order, including the first.
  pub max_order_attempts: u32,
}

impl From<&TradingConfig> for ExecutorConfig {
  fn from(config: &TradingConfig) -> Self {
    Self {
      settlement_currency: config.settlement_currency.clone(),
      markup: config.markup,
      max_order_attempts: config.max_order_attempts,
    }
  }
}

/// Places the buy order for one newly discovered listing.
pub struct TradeExecutor<G: ExchangeGateway, S: MessageSink> {
  /// Exchange port.
  gateway: Arc<G>,
  /// Operator output.
  sink: Arc<S>,
  /// Settings.
  config: ExecutorConfig,
}

impl<G: ExchangeGateway, S: MessageSink> TradeExecutor<G, S> {
  /// Create a new executor.
  pub const fn new(gateway: Arc<G>, sink: Arc<S>, config: ExecutorConfig) -> Self {
    Self {
      gateway,
      sink,
      config,
    }
  }

  /// Try to buy `budget` worth of `product_id`.
  #[instrument(skip(self, precisions), fields(product = %product_id))]
  pub async fn execute(
    &self,
    product_id: &ProductId,
    precisions: Precisions,
    budget: Decimal,
    fee_rate: Decimal,
  ) -> TradeOutcome {
    // 1. Current price
    let price = match self.gateway.fetch_price(product_id).await {
      Ok(Some(price)) => price,
      Ok(None) => {
        self.sink.emit(&format!("No price available yet for {product_id}, skipping"));
        return TradeOutcome::Skipped(SkipReason::NoPrice);
      }
      Err(e) => return self.unavailable(product_id, &e.to_string()),
    };

    // 2. Order sizing
    let Some(intent) = OrderIntent::compute(price, self.config.markup, precisions, budget) else {
      self.sink.emit(&format!(
        "No usable price for {product_id} (ticker {price}), skipping"
      ));
      return TradeOutcome::Skipped(SkipReason::NoPrice);
    };
    debug!(price = %intent.price, size = %intent.size, cost = %intent.total_cost, "Order sized");
    let currency = &self.config.settlement_currency;
    if !intent.has_size() {
      self.sink.emit(&format!(
        "Budget of {budget} {currency} buys no {product_id} at {} {currency}, skipping",
        intent.price
      ));
      return TradeOutcome::Skipped(SkipReason::SizeTooSmall);
    }

    // 3. Fresh balance, never cached
    let balance = match self.gateway.fetch_balance(currency).await {
      Ok(balance) => balance,
      Err(e) => return self.unavailable(product_id, &e.to_string()),
    };

    // 4. Balance gate
    if !intent.is_affordable(balance, fee_rate) {
      self.sink.emit(&format!(
        "Not enough {currency} to purchase {} {product_id} at {} {currency}",
        intent.size, intent.price
      ));
      return TradeOutcome::Skipped(SkipReason::InsufficientBalance {
        balance,
        required: intent.required_funds(fee_rate),
      });
    }

    // 5. Bounded retry
    match self.submit_with_retry(product_id, &intent).await {
      Ok((handle, attempts)) => {
        self.sink.emit(&format!(
          "Submitted buy order for {product_id}. Order size: {}. Price: {}. Amount {currency} spent: {}",
          intent.size, intent.price, intent.total_cost
        ));
        TradeOutcome::Submitted {
          product_id: product_id.clone(),
          intent,
          order_id: handle.order_id,
          attempts,
        }
      }
      Err(e) => {
        self.sink.emit(&format!("ERROR: could not buy {product_id}"));
        TradeOutcome::Failed(FailureReason::MaxRetriesExceeded {
          attempts: self.config.max_order_attempts,
          last_error: e.to_string(),
        })
      }
    }
  }

  /// Submit the order up to `max_order_attempts` times with no delay.
  ///
  /// Returns the handle and the 1-based attempt that succeeded, or the
  /// error of the last attempt.
  async fn submit_with_retry(
    &self,
    product_id: &ProductId,
    intent: &OrderIntent,
  ) -> Result<(OrderHandle, u32), OrderError> {
    let mut last_error = None;

    for attempt in 1..=self.config.max_order_attempts {
      match self
        .gateway
        .submit_limit_buy(product_id, intent.price, intent.size)
        .await
      {
        Ok(handle) => return Ok((handle, attempt)),
        Err(e) => {
          warn!(attempt, error = %e, "Order submission failed");
          last_error = Some(e);
        }
      }
    }

    Err(last_error.unwrap_or_else(|| OrderError::Rejected("no attempts configured".to_string())))
  }

  fn unavailable(&self, product_id: &str, error: &str) -> TradeOutcome {
    self.sink.emit(&format!(
      "ERROR: could not prepare order for {product_id} - {error}"
    ));
    TradeOutcome::Failed(FailureReason::Unavailable(error.to_string()))
  }
}
