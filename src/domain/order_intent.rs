//! Order intent sizing for a freshly listed product.
//!
//! Turns a ticker price, the listing's precisions and the per-listing
//! budget into an exact limit price and size. All arithmetic happens in
//! `Decimal` and every rounding step uses banker's rounding
//! (round half to even) so identical inputs always produce identical
//! orders.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::listing::Precisions;

/// Markup applied on top of the ticker price (1%).
pub const DEFAULT_MARKUP: Decimal = dec!(0.01);

/// Rounding used for both price and size.
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Limit buy parameters derived for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderIntent {
    /// Limit price, rounded to the quote precision.
    pub price: Decimal,
    /// Order size in base currency, rounded to the base precision.
    pub size: Decimal,
    /// `price * size` in settlement currency.
    pub total_cost: Decimal,
}

impl OrderIntent {
    /// Size a limit buy that spends roughly `budget` at `market_price`
    /// marked up by `markup`.
    ///
    /// Returns `None` when the marked-up price rounds to zero (or below),
    /// or the division overflows; there is nothing sensible to submit
    /// in either case.
    pub fn compute(
        market_price: Decimal,
        markup: Decimal,
        precisions: Precisions,
        budget: Decimal,
    ) -> Option<Self> {
        let price = (market_price + market_price * markup)
            .round_dp_with_strategy(precisions.quote, ROUNDING);
        if price <= Decimal::ZERO {
            return None;
        }

        let size = budget
            .checked_div(price)?
            .round_dp_with_strategy(precisions.base, ROUNDING);
        let total_cost = price.checked_mul(size)?;

        Some(Self {
            price,
            size,
            total_cost,
        })
    }

    /// True if the budget buys at least one base-precision step.
    pub fn has_size(&self) -> bool {
        self.size > Decimal::ZERO
    }

    /// Settlement currency needed to cover the order plus the maker fee.
    pub fn required_funds(&self, fee_rate: Decimal) -> Decimal {
        self.total_cost + self.total_cost * fee_rate
    }

    /// True if `balance` covers the order including fees.
    pub fn is_affordable(&self, balance: Decimal, fee_rate: Decimal) -> bool {
        balance >= self.required_funds(fee_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_marked_up_and_rounded_to_quote_precision() {
        let intent = OrderIntent::compute(
            dec!(100.0),
            DEFAULT_MARKUP,
            Precisions { base: 8, quote: 2 },
            dec!(10),
        )
        .unwrap();
        assert_eq!(intent.price, dec!(101.00));
        assert_eq!(intent.size, dec!(0.09900990));
    }

    #[test]
    fn test_new_listing_scenario() {
        let intent = OrderIntent::compute(
            dec!(2.00),
            DEFAULT_MARKUP,
            Precisions { base: 4, quote: 2 },
            dec!(10),
        )
        .unwrap();
        assert_eq!(intent.price, dec!(2.02));
        assert_eq!(intent.size, dec!(4.9505));
        assert_eq!(intent.total_cost, dec!(10.000010));
        assert!(intent.is_affordable(dec!(20), dec!(0.01)));
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // 0.125 * 1.00 -> 0.125 rounds to 0.12, 0.135 rounds to 0.14
        let p = Precisions { base: 0, quote: 2 };
        let a = OrderIntent::compute(dec!(0.125), Decimal::ZERO, p, dec!(1)).unwrap();
        let b = OrderIntent::compute(dec!(0.135), Decimal::ZERO, p, dec!(1)).unwrap();
        assert_eq!(a.price, dec!(0.12));
        assert_eq!(b.price, dec!(0.14));
    }

    #[test]
    fn test_integer_precision_sizes() {
        let intent = OrderIntent::compute(
            dec!(3),
            Decimal::ZERO,
            Precisions { base: 0, quote: 0 },
            dec!(10),
        )
        .unwrap();
        assert_eq!(intent.price, dec!(3));
        assert_eq!(intent.size, dec!(3));
        assert_eq!(intent.total_cost, dec!(9));
    }

    #[test]
    fn test_price_rounding_to_zero_yields_none() {
        let intent = OrderIntent::compute(
            dec!(0.001),
            DEFAULT_MARKUP,
            Precisions { base: 2, quote: 2 },
            dec!(10),
        );
        assert!(intent.is_none());
    }

    #[test]
    fn test_budget_below_one_unit_has_no_size() {
        let intent = OrderIntent::compute(
            dec!(50),
            DEFAULT_MARKUP,
            Precisions { base: 0, quote: 2 },
            dec!(10),
        )
        .unwrap();
        assert_eq!(intent.size, Decimal::ZERO);
        assert_eq!(intent.total_cost, Decimal::ZERO);
        assert!(!intent.has_size());

        let sized = OrderIntent::compute(
            dec!(50),
            DEFAULT_MARKUP,
            Precisions { base: 2, quote: 2 },
            dec!(10),
        )
        .unwrap();
        assert!(sized.has_size());
    }

    #[test]
    fn test_balance_gate() {
        let intent = OrderIntent {
            price: dec!(99),
            size: dec!(1),
            total_cost: dec!(99),
        };
        assert_eq!(intent.required_funds(dec!(0.01)), dec!(99.99));
        assert!(intent.is_affordable(dec!(100), dec!(0.01)));
        assert!(intent.is_affordable(dec!(99.99), dec!(0.01)));
        assert!(!intent.is_affordable(dec!(99), dec!(0.01)));
    }
}
