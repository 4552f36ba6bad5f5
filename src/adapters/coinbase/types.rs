//! Coinbase Exchange REST Request/Response Types
//!
//! Serialization types for the handful of endpoints the bot uses.
//! Numeric fields arrive as JSON strings; prices and balances are
//! parsed straight into `Decimal`, while increments are kept as the
//! raw string because their digit count is what matters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::listing::TradingFlags;

/// One entry of `GET /products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductResponse {
  /// Product ID, e.g. `BTC-USD`.
  pub id: String,
  /// Smallest size step, e.g. `"0.00000001"`.
  pub base_increment: String,
  /// Smallest price step, e.g. `"0.01"`.
  pub quote_increment: String,
  /// Only cancellations accepted.
  #[serde(default)]
  pub cancel_only: bool,
  /// Only maker orders accepted.
  #[serde(default)]
  pub post_only: bool,
  /// Trading switched off.
  #[serde(default)]
  pub trading_disabled: bool,
  /// Book in auction mode.
  #[serde(default)]
  pub auction_mode: bool,
}

impl ProductResponse {
  /// Trading restriction flags of this product.
  pub const fn flags(&self) -> TradingFlags {
    TradingFlags {
      cancel_only: self.cancel_only,
      post_only: self.post_only,
      trading_disabled: self.trading_disabled,
      auction_mode: self.auction_mode,
    }
  }
}

/// Response of `GET /products/{id}/ticker`.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerResponse {
  /// Last trade price; absent before the first trade.
  #[serde(default)]
  pub price: Option<Decimal>,
}

/// One entry of `GET /accounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
  /// Currency code, e.g. `USD`.
  pub currency: String,
  /// Total funds in the account.
  pub balance: Decimal,
}

/// Response of `GET /fees`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeesResponse {
  /// Fee fraction for liquidity-adding orders.
  pub maker_fee_rate: Decimal,
}

/// Body of `POST /orders` for a limit buy.
#[derive(Debug, Clone, Serialize)]
pub struct LimitOrderRequest {
  /// Product to buy.
  pub product_id: String,
  /// Always `"buy"`.
  pub side: &'static str,
  /// Always `"limit"`.
  #[serde(rename = "type")]
  pub order_type: &'static str,
  /// Limit price, serialized as a string.
  pub price: Decimal,
  /// Size in base currency, serialized as a string.
  pub size: Decimal,
  /// Client-chosen order ID for correlating logs.
  pub client_oid: String,
}

/// Response of `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
  /// Exchange order ID.
  pub id: String,
  /// Order status, e.g. `pending`.
  #[serde(default)]
  pub status: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
  /// Human-readable reason.
  pub message: String,
}
