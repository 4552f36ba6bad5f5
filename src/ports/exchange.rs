//! Exchange Gateway Port - Public and Private Exchange Capabilities
//!
//! Defines the trait the use cases need from the exchange: the public
//! product catalog and ticker, plus the authenticated balance, fee and
//! order endpoints. Implementations translate wire responses into
//! domain types and never retry internally; retry policy belongs to
//! the caller.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::listing::{Catalog, ProductId};
use crate::domain::trade::OrderId;
use crate::error::{OrderError, TransportError};

/// Acknowledgement of an accepted limit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHandle {
  /// Exchange-assigned order ID.
  pub order_id: OrderId,
  /// Status reported at submission (e.g. `pending`), if any.
  pub status: Option<String>,
}

/// Trait for exchange connectivity.
///
/// None of these calls are idempotent at this level: a caller that
/// retries `submit_limit_buy` after a lost response may end up with two
/// orders.
#[async_trait]
pub trait ExchangeGateway: Send + Sync + 'static {
  /// Fetch the tradable, settlement-quoted products and their precisions.
  ///
  /// # Errors
  /// Returns `TransportError` on any network, HTTP or decode failure.
  async fn fetch_catalog(&self) -> Result<Catalog, TransportError>;

  /// Fetch the last traded price for a product.
  ///
  /// Returns `Ok(None)` when the exchange has no price for it yet.
  async fn fetch_price(&self, product_id: &str) -> Result<Option<Decimal>, TransportError>;

  /// Fetch the account balance held in `currency` (zero if no account).
  async fn fetch_balance(&self, currency: &str) -> Result<Decimal, TransportError>;

  /// Fetch the account's maker fee rate (e.g. 0.004 = 0.4%).
  async fn fetch_maker_fee_rate(&self) -> Result<Decimal, TransportError>;

  /// Place a limit buy.
  ///
  /// # Errors
  /// Returns `OrderError::Rejected` if the exchange refuses the order and
  /// `OrderError::Transport` if no verdict was received.
  async fn submit_limit_buy(
    &self,
    product_id: &ProductId,
    price: Decimal,
    size: Decimal,
  ) -> Result<OrderHandle, OrderError>;
}
