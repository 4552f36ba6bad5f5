//! Trade outcomes reported by the executor.
//!
//! Every attempt to buy a new listing ends in exactly one of these
//! outcomes. The driver only inspects them to decide whether the rest
//! of the batch should still be processed.

use rust_decimal::Decimal;

use super::listing::ProductId;
use super::order_intent::OrderIntent;

/// Lightweight order identifier returned by the exchange.
pub type OrderId = String;

/// Why an asset was skipped without submitting anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The ticker has no price yet (or one too small to size an order).
    NoPrice,
    /// The budget rounds to a zero size at the product's base precision.
    SizeTooSmall,
    /// The account cannot cover the order plus fees.
    InsufficientBalance {
        /// Settlement balance at the time of the check.
        balance: Decimal,
        /// Order cost including the maker fee.
        required: Decimal,
    },
}

/// Why an asset's purchase was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Every submission attempt failed.
    MaxRetriesExceeded {
        /// Attempts made before giving up.
        attempts: u32,
        /// Error from the final attempt.
        last_error: String,
    },
    /// Price or balance could not be fetched, so no order was sized.
    Unavailable(String),
}

/// Final result of processing one newly listed product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeOutcome {
    /// A limit buy was accepted by the exchange.
    Submitted {
        /// Product that was bought.
        product_id: ProductId,
        /// Price, size and cost of the order.
        intent: OrderIntent,
        /// Exchange order ID.
        order_id: OrderId,
        /// Attempt (1-based) that succeeded.
        attempts: u32,
    },
    /// Nothing was submitted.
    Skipped(SkipReason),
    /// Submission was attempted or prepared and failed.
    Failed(FailureReason),
}

impl TradeOutcome {
    /// True if the remaining listings of this poll must not be traded.
    ///
    /// Only a balance shortfall stops the batch; a shortfall on one listing
    /// is taken to mean the account is drained for this cycle.
    pub const fn halts_batch(&self) -> bool {
        matches!(self, Self::Skipped(SkipReason::InsufficientBalance { .. }))
    }

    /// True if an order reached the exchange.
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}
