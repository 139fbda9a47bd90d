//! Pricing
//!
//! Order totals are always derived from the current cart lines and never stored.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while calculating order totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// A line total or the order sum does not fit in minor units.
    #[error("order total overflowed")]
    Overflow,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(MoneyError),
}

impl From<MoneyError> for TotalsError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::Overflow => TotalsError::Overflow,
            other => TotalsError::Money(other),
        }
    }
}

/// Flat-rate shipping with a free-shipping threshold, in whole currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this amount ship for free.
    pub free_over: u32,

    /// Fee charged for any other non-empty order.
    pub fee: u32,
}

impl ShippingPolicy {
    /// Create a shipping policy.
    pub fn new(free_over: u32, fee: u32) -> Self {
        Self { free_over, fee }
    }

    /// Shipping charge for the given subtotal.
    pub fn shipping_for<'a>(&self, subtotal: Money<'a, Currency>) -> Money<'a, Currency> {
        let currency = subtotal.currency();
        let threshold = Money::from_major(i64::from(self.free_over), currency);

        if !subtotal.is_positive() || subtotal.amount() > threshold.amount() {
            Money::from_minor(0, currency)
        } else {
            Money::from_major(i64::from(self.fee), currency)
        }
    }
}

impl Default for ShippingPolicy {
    /// Free shipping strictly above 800, otherwise a flat fee of 49.
    fn default() -> Self {
        Self::new(800, 49)
    }
}

/// Subtotal, shipping and total for a cart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of price × quantity over all lines
    pub subtotal: Money<'a, Currency>,

    /// Shipping charge under the active policy
    pub shipping: Money<'a, Currency>,

    /// Subtotal plus shipping
    pub total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Totals for an empty order.
    pub fn zero(currency: &'a Currency) -> Self {
        Self {
            subtotal: Money::from_minor(0, currency),
            shipping: Money::from_minor(0, currency),
            total: Money::from_minor(0, currency),
        }
    }
}

/// Calculates the totals of a list of cart lines.
///
/// # Errors
///
/// - [`TotalsError::Overflow`]: a line total, the subtotal or the total exceeds `i64` minor units.
/// - [`TotalsError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn order_totals<'a>(
    lines: &[CartLine<'a>],
    currency: &'a Currency,
    policy: &ShippingPolicy,
) -> Result<OrderTotals<'a>, TotalsError> {
    let subtotal = lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            Ok::<_, TotalsError>(acc.add(line.line_total()?)?)
        })?;

    // Every amount must stay representable in minor units.
    subtotal.try_to_minor_units()?;

    let shipping = policy.shipping_for(subtotal);
    let total = subtotal.add(shipping)?;

    total.try_to_minor_units()?;

    Ok(OrderTotals {
        subtotal,
        shipping,
        total,
    })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso::{NOK, SEK};
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine<'static> {
        CartLine::new(
            ProductId::from(id),
            format!("Product {id}"),
            Money::from_major(price, SEK),
            String::new(),
            NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
        )
    }

    #[test]
    fn empty_order_is_free() -> TestResult {
        let totals = order_totals(&[], SEK, &ShippingPolicy::default())?;

        assert_eq!(totals, OrderTotals::zero(SEK));

        Ok(())
    }

    #[test]
    fn small_order_pays_flat_fee() -> TestResult {
        let lines = [line("p-1", 250, 1), line("p-2", 300, 1)];

        let totals = order_totals(&lines, SEK, &ShippingPolicy::default())?;

        assert_eq!(totals.subtotal, Money::from_major(550, SEK));
        assert_eq!(totals.shipping, Money::from_major(49, SEK));
        assert_eq!(totals.total, Money::from_major(599, SEK));

        Ok(())
    }

    #[test]
    fn order_above_threshold_ships_free() -> TestResult {
        let lines = [line("p-1", 250, 1), line("p-2", 300, 2)];

        let totals = order_totals(&lines, SEK, &ShippingPolicy::default())?;

        assert_eq!(totals.subtotal, Money::from_major(850, SEK));
        assert_eq!(totals.shipping, Money::from_major(0, SEK));
        assert_eq!(totals.total, Money::from_major(850, SEK));

        Ok(())
    }

    #[test]
    fn threshold_is_exclusive() -> TestResult {
        let lines = [line("p-1", 400, 2)];

        let totals = order_totals(&lines, SEK, &ShippingPolicy::default())?;

        assert_eq!(totals.subtotal, Money::from_major(800, SEK));
        assert_eq!(totals.shipping, Money::from_major(49, SEK));
        assert_eq!(totals.total, Money::from_major(849, SEK));

        Ok(())
    }

    #[test]
    fn custom_policy_is_respected() -> TestResult {
        let lines = [line("p-1", 100, 1)];
        let policy = ShippingPolicy::new(99, 25);

        let totals = order_totals(&lines, SEK, &policy)?;

        assert_eq!(totals.shipping, Money::from_major(0, SEK));
        assert_eq!(totals.total, Money::from_major(100, SEK));

        Ok(())
    }

    #[test]
    fn overflowing_subtotal_is_reported() {
        let lines = [
            CartLine::new(
                ProductId::from("p-1"),
                "Huge".to_string(),
                Money::from_minor(i64::MAX / 2, SEK),
                String::new(),
                NonZeroU32::MIN,
            ),
            CartLine::new(
                ProductId::from("p-2"),
                "Huge".to_string(),
                Money::from_minor(i64::MAX / 2 + 10, SEK),
                String::new(),
                NonZeroU32::MIN,
            ),
        ];

        let result = order_totals(&lines, SEK, &ShippingPolicy::default());

        assert_eq!(result, Err(TotalsError::Overflow));
    }

    #[test]
    fn largest_fee_is_added_to_total() -> TestResult {
        let lines = [line("p-1", 100, 1)];
        let policy = ShippingPolicy::new(800, u32::MAX);

        let totals = order_totals(&lines, SEK, &policy)?;

        assert_eq!(totals.shipping, Money::from_major(i64::from(u32::MAX), SEK));
        assert_eq!(
            totals.total.try_to_minor_units()?,
            10_000 + i64::from(u32::MAX) * 100
        );

        Ok(())
    }

    #[test]
    fn largest_threshold_still_charges_fee() -> TestResult {
        let lines = [line("p-1", 100, 1)];
        let policy = ShippingPolicy::new(u32::MAX, 49);

        let totals = order_totals(&lines, SEK, &policy)?;

        assert_eq!(totals.shipping, Money::from_major(49, SEK));
        assert_eq!(totals.total, Money::from_major(149, SEK));

        Ok(())
    }

    #[test]
    fn zero_threshold_ships_every_order_free() {
        let policy = ShippingPolicy::new(0, 49);

        assert_eq!(
            policy.shipping_for(Money::from_minor(1, SEK)),
            Money::from_major(0, SEK)
        );
        assert_eq!(
            policy.shipping_for(Money::from_minor(0, SEK)),
            Money::from_major(0, SEK)
        );
    }

    #[test]
    fn total_is_subtotal_plus_shipping_for_any_policy() -> TestResult {
        let policies = [
            ShippingPolicy::new(0, 0),
            ShippingPolicy::default(),
            ShippingPolicy::new(1, u32::MAX),
            ShippingPolicy::new(u32::MAX, u32::MAX),
        ];
        let carts = [
            vec![],
            vec![line("p-1", 1, 1)],
            vec![line("p-1", 400, 2)],
            vec![line("p-1", 250, 1), line("p-2", 300, 3)],
            vec![line("p-1", i64::from(u32::MAX), 1)],
        ];

        for policy in &policies {
            for lines in &carts {
                let totals = order_totals(lines, SEK, policy)?;

                assert_eq!(
                    totals.total,
                    totals.subtotal.add(totals.shipping)?,
                    "{policy:?} with {} lines",
                    lines.len()
                );
                assert!(!totals.shipping.is_negative(), "{policy:?} gave negative shipping");
            }
        }

        Ok(())
    }

    #[test]
    fn foreign_currency_line_is_reported() {
        let lines = [CartLine::new(
            ProductId::from("p-1"),
            "Lamp".to_string(),
            Money::from_major(100, NOK),
            String::new(),
            NonZeroU32::MIN,
        )];

        let result = order_totals(&lines, SEK, &ShippingPolicy::default());

        assert!(
            matches!(
                result,
                Err(TotalsError::Money(MoneyError::CurrencyMismatch { .. }))
            ),
            "expected currency mismatch, got {result:?}"
        );
    }
}
