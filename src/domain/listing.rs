//! Listing Snapshot Types - What the Exchange Currently Lets Us Trade
//!
//! A `Catalog` is the immutable snapshot produced by one poll of the
//! product list: product ID to the pair of decimal precisions the
//! exchange enforces on size and price. Catalogs are rebuilt from
//! scratch every poll and never edited in place.

use std::collections::BTreeMap;

/// Exchange product identifier, `<BASE>-<QUOTE>` (e.g. `BTC-USD`).
pub type ProductId = String;

/// Decimal precisions for one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precisions {
    /// Digits allowed after the decimal point in the order size.
    pub base: u32,
    /// Digits allowed after the decimal point in the price.
    pub quote: u32,
}

impl Precisions {
    /// Build precisions from the exchange's increment strings.
    pub fn from_increments(base_increment: &str, quote_increment: &str) -> Self {
        Self {
            base: precision_from_increment(base_increment),
            quote: precision_from_increment(quote_increment),
        }
    }
}

/// Snapshot of tradable listings, ordered by product ID.
pub type Catalog = BTreeMap<ProductId, Precisions>;

/// Trading-state flags the exchange publishes for each product.
///
/// A product is tradable only when every restriction is off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradingFlags {
    /// Only cancellations are accepted.
    pub cancel_only: bool,
    /// Only maker orders are accepted.
    pub post_only: bool,
    /// Trading is switched off.
    pub trading_disabled: bool,
    /// The book is in an opening auction.
    pub auction_mode: bool,
}

impl TradingFlags {
    /// True when no restriction is active.
    pub const fn is_tradable(&self) -> bool {
        !(self.cancel_only || self.post_only || self.trading_disabled || self.auction_mode)
    }
}

/// True if `product_id` is quoted in `settlement_currency`.
pub fn is_quoted_in(product_id: &str, settlement_currency: &str) -> bool {
    product_id
        .rsplit_once('-')
        .is_some_and(|(base, quote)| !base.is_empty() && quote == settlement_currency)
}

/// Number of digits after the decimal point in an increment string.
///
/// `"0.001"` is 3, `"0.1"` is 1, and an increment without a fractional
/// part such as `"1"` is 0. Digits are counted literally, so `"1.0"`
/// yields 1.
pub fn precision_from_increment(increment: &str) -> u32 {
    increment
        .trim()
        .split_once('.')
        .map_or(0, |(_, fraction)| {
            u32::try_from(fraction.chars().count()).unwrap_or(u32::MAX)
        })
}
