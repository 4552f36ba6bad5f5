//! Coinbase Gateway — `ExchangeGateway` over the REST client
//!
//! Translates Coinbase responses into domain types: the product list
//! becomes a filtered `Catalog`, tickers become optional prices, and
//! order acknowledgements become `OrderHandle`s.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::client::CoinbaseClient;
use super::types::{
  AccountResponse, FeesResponse, LimitOrderRequest, OrderResponse, ProductResponse,
  TickerResponse,
};
use crate::domain::listing::{is_quoted_in, Catalog, Precisions, ProductId};
use crate::error::{OrderError, TransportError};
use crate::ports::exchange::{ExchangeGateway, OrderHandle};

/// Exchange gateway backed by the Coinbase REST client.
pub struct CoinbaseGateway {
  /// Shared REST client with request signing.
  client: CoinbaseClient,
  /// Quote currency listings must trade against.
  settlement_currency: String,
}

impl CoinbaseGateway {
  /// Create a gateway that only reports products quoted in
  /// `settlement_currency`.
  pub fn new(client: CoinbaseClient, settlement_currency: impl Into<String>) -> Self {
    Self {
      client,
      settlement_currency: settlement_currency.into(),
    }
  }
}

/// Keep tradable, settlement-quoted products and convert their increments.
pub fn build_catalog(products: &[ProductResponse], settlement_currency: &str) -> Catalog {
  products
    .iter()
    .filter(|p| is_quoted_in(&p.id, settlement_currency) && p.flags().is_tradable())
    .map(|p| {
      (
        p.id.clone(),
        Precisions::from_increments(&p.base_increment, &p.quote_increment),
      )
    })
    .collect()
}

/// Ticker price, treating a 404 on a brand-new product as "no price yet".
pub fn price_from(
  ticker: Result<TickerResponse, TransportError>,
) -> Result<Option<Decimal>, TransportError> {
  match ticker {
    Ok(ticker) => Ok(ticker.price),
    Err(e) if e.status() == Some(404) => {
      debug!(error = %e, "Ticker not available yet");
      Ok(None)
    }
    Err(e) => Err(e),
  }
}

/// Balance held in `currency`, zero when the account list has no entry.
pub fn balance_of(accounts: &[AccountResponse], currency: &str) -> Decimal {
  accounts
    .iter()
    .find(|a| a.currency == currency)
    .map_or(Decimal::ZERO, |a| a.balance)
}

/// Classify the `POST /orders` reply.
///
/// A 4xx or a `rejected` status means the exchange refused the order;
/// any other failure left it without a verdict.
pub fn order_result(
  response: Result<OrderResponse, TransportError>,
) -> Result<OrderHandle, OrderError> {
  let response = match response {
    Ok(response) => response,
    Err(TransportError::Status { status, message }) if (400..500).contains(&status) => {
      warn!(status, reason = %message, "Order rejected");
      return Err(OrderError::Rejected(message));
    }
    Err(e) => return Err(e.into()),
  };

  if response.status.as_deref() == Some("rejected") {
    warn!(order_id = %response.id, "Order rejected after acceptance");
    return Err(OrderError::Rejected(format!("order {} rejected", response.id)));
  }

  Ok(OrderHandle {
    order_id: response.id,
    status: response.status,
  })
}

#[async_trait]
impl ExchangeGateway for CoinbaseGateway {
  async fn fetch_catalog(&self) -> Result<Catalog, TransportError> {
    let products: Vec<ProductResponse> = self.client.public_get("/products").await?;
    let catalog = build_catalog(&products, &self.settlement_currency);
    debug!(
      products = products.len(),
      tradable = catalog.len(),
      "Product catalog fetched"
    );
    Ok(catalog)
  }

  async fn fetch_price(&self, product_id: &str) -> Result<Option<Decimal>, TransportError> {
    let path = format!("/products/{product_id}/ticker");
    price_from(self.client.public_get::<TickerResponse>(&path).await)
  }

  async fn fetch_balance(&self, currency: &str) -> Result<Decimal, TransportError> {
    let accounts: Vec<AccountResponse> = self.client.private_get("/accounts").await?;
    Ok(balance_of(&accounts, currency))
  }

  async fn fetch_maker_fee_rate(&self) -> Result<Decimal, TransportError> {
    let fees: FeesResponse = self.client.private_get("/fees").await?;
    Ok(fees.maker_fee_rate)
  }

  #[instrument(skip(self), fields(product = %product_id, price = %price, size = %size))]
  async fn submit_limit_buy(
    &self,
    product_id: &ProductId,
    price: Decimal,
    size: Decimal,
  ) -> Result<OrderHandle, OrderError> {
    let request = LimitOrderRequest {
      product_id: product_id.clone(),
      side: "buy",
      order_type: "limit",
      price,
      size,
      client_oid: Uuid::new_v4().to_string(),
    };

    let handle = order_result(self.client.private_post("/orders", &request).await)?;
    info!(order_id = %handle.order_id, client_oid = %request.client_oid, "Order placed");
    Ok(handle)
  }
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;

  fn product(id: &str, base: &str, quote: &str) -> ProductResponse {
    ProductResponse {
      id: id.to_string(),
      base_increment: base.to_string(),
      quote_increment: quote.to_string(),
      cancel_only: false,
      post_only: false,
      trading_disabled: false,
      auction_mode: false,
    }
  }

  #[test]
  fn test_build_catalog_filters_and_converts() {
    let mut auction = product("AUC-USD", "1", "0.01");
    auction.auction_mode = true;
    let mut post_only = product("PO-USD", "1", "0.01");
    post_only.post_only = true;
    let mut cancel_only = product("CO-USD", "1", "0.01");
    cancel_only.cancel_only = true;
    let mut disabled = product("OFF-USD", "1", "0.01");
    disabled.trading_disabled = true;

    let products = vec![
      product("BTC-USD", "0.00000001", "0.01"),
      product("ETH-BTC", "0.00000001", "0.00001"),
      product("SHIB-USD", "1", "0.00000001"),
      auction,
      post_only,
      cancel_only,
      disabled,
    ];

    let catalog = build_catalog(&products, "USD");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog["BTC-USD"], Precisions { base: 8, quote: 2 });
    assert_eq!(catalog["SHIB-USD"], Precisions { base: 0, quote: 8 });
  }

  #[test]
  fn test_build_catalog_respects_settlement_currency() {
    let products = vec![
      product("BTC-USD", "0.00000001", "0.01"),
      product("BTC-EUR", "0.00000001", "0.01"),
    ];
    let catalog = build_catalog(&products, "EUR");
    assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["BTC-EUR"]);
  }

  fn not_found() -> TransportError {
    TransportError::Status {
      status: 404,
      message: "NotFound".to_string(),
    }
  }

  #[test]
  fn test_ticker_404_means_no_price_yet() {
    assert_eq!(price_from(Err(not_found())).unwrap(), None);
    assert_eq!(
      price_from(Ok(TickerResponse { price: Some(dec!(2.00)) })).unwrap(),
      Some(dec!(2.00))
    );
    assert_eq!(price_from(Ok(TickerResponse { price: None })).unwrap(), None);
  }

  #[test]
  fn test_ticker_server_error_is_propagated() {
    let err = price_from(Err(TransportError::Status {
      status: 502,
      message: "bad gateway".to_string(),
    }))
    .unwrap_err();
    assert_eq!(err.status(), Some(502));
  }

  #[test]
  fn test_balance_of_missing_currency_is_zero() {
    let accounts = vec![
      AccountResponse { currency: "BTC".to_string(), balance: dec!(0.5) },
      AccountResponse { currency: "USD".to_string(), balance: dec!(250.75) },
    ];
    assert_eq!(balance_of(&accounts, "USD"), dec!(250.75));
    assert_eq!(balance_of(&accounts, "EUR"), Decimal::ZERO);
    assert_eq!(balance_of(&[], "USD"), Decimal::ZERO);
  }

  #[test]
  fn test_order_4xx_is_rejection() {
    let result = order_result(Err(TransportError::Status {
      status: 400,
      message: "Insufficient funds".to_string(),
    }));
    assert!(matches!(result, Err(OrderError::Rejected(m)) if m == "Insufficient funds"));
  }

  #[test]
  fn test_order_5xx_is_transport_failure() {
    let result = order_result(Err(TransportError::Status {
      status: 503,
      message: "unavailable".to_string(),
    }));
    assert!(matches!(result, Err(OrderError::Transport(_))));
  }

  #[test]
  fn test_order_rejected_status_is_rejection() {
    let result = order_result(Ok(OrderResponse {
      id: "ord-1".to_string(),
      status: Some("rejected".to_string()),
    }));
    assert!(matches!(result, Err(OrderError::Rejected(_))));
  }

  #[test]
  fn test_order_pending_becomes_handle() {
    let handle = order_result(Ok(OrderResponse {
      id: "ord-2".to_string(),
      status: Some("pending".to_string()),
    }))
    .unwrap();
    assert_eq!(handle.order_id, "ord-2");
    assert_eq!(handle.status.as_deref(), Some("pending"));
  }
}
