//! Cart

use std::num::NonZeroU32;

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{OrderTotals, ShippingPolicy, TotalsError, order_totals},
    products::{Product, ProductId},
};

mod line;

pub use line::CartLine;

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// The effect of a cart mutation.
///
/// Every mutating method reports what it did so that callers know to re-read
/// [`Cart::lines`] and [`Cart::totals`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added {
        /// Product of the new line
        product_id: ProductId,

        /// Quantity of the new line
        quantity: NonZeroU32,
    },

    /// An existing line's quantity grew.
    Increased {
        /// Product of the merged line
        product_id: ProductId,

        /// Quantity after the merge
        quantity: NonZeroU32,
    },

    /// A line's quantity was overwritten.
    QuantitySet {
        /// Product of the edited line
        product_id: ProductId,

        /// Quantity after clamping
        quantity: NonZeroU32,
    },

    /// A line was removed.
    Removed {
        /// Product of the removed line
        product_id: ProductId,
    },

    /// Every line was removed.
    Cleared {
        /// Number of lines that were in the cart
        lines: usize,
    },

    /// Nothing changed (e.g. the product was not in the cart).
    Unchanged,
}

/// Shopping cart
///
/// Lines are kept in first-add order with at most one line per product.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
    shipping: ShippingPolicy,
}

impl<'a> Cart<'a> {
    /// Create an empty cart using the default shipping policy.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_policy(currency, ShippingPolicy::default())
    }

    /// Create an empty cart using the given shipping policy.
    #[must_use]
    pub fn with_policy(currency: &'static Currency, shipping: ShippingPolicy) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
            shipping,
        }
    }

    /// Add a single unit of a product.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the product is priced in another currency.
    pub fn add(&mut self, product: &Product<'a>) -> Result<CartChange, CartError> {
        self.add_quantity(product, NonZeroU32::MIN)
    }

    /// Add `quantity` units of a product, merging into its existing line if present.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the product is priced in another currency.
    pub fn add_quantity(
        &mut self,
        product: &Product<'a>,
        quantity: NonZeroU32,
    ) -> Result<CartChange, CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.line_mut(&product.id) {
            line.increase(quantity);

            debug!(product = %product.id, quantity = line.quantity().get(), "increased cart line");

            return Ok(CartChange::Increased {
                product_id: product.id.clone(),
                quantity: line.quantity(),
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));

        debug!(product = %product.id, quantity = quantity.get(), "added cart line");

        Ok(CartChange::Added {
            product_id: product.id.clone(),
            quantity,
        })
    }

    /// Remove the line for a product. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> CartChange {
        let Some(idx) = self
            .lines
            .iter()
            .position(|line| line.product_id() == product_id)
        else {
            return CartChange::Unchanged;
        };

        self.lines.remove(idx);

        debug!(product = %product_id, "removed cart line");

        CartChange::Removed {
            product_id: product_id.clone(),
        }
    }

    /// Set a line's quantity, clamping anything below one up to one.
    ///
    /// Quantity edits never remove a line; use [`Cart::remove`] for that.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> CartChange {
        let clamped = NonZeroU32::new(u32::try_from(quantity.max(1)).unwrap_or(u32::MAX))
            .unwrap_or(NonZeroU32::MIN);

        let Some(line) = self.line_mut(product_id) else {
            return CartChange::Unchanged;
        };

        line.set_quantity(clamped);

        debug!(
            product = %product_id,
            requested = quantity,
            quantity = clamped.get(),
            "set cart line quantity"
        );

        CartChange::QuantitySet {
            product_id: product_id.clone(),
            quantity: clamped,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartChange {
        let lines = self.lines.len();

        self.lines.clear();

        debug!(lines, "cleared cart");

        CartChange::Cleared { lines }
    }

    /// Calculate subtotal, shipping and total from the current lines.
    ///
    /// # Errors
    ///
    /// Returns a `TotalsError` if the totals overflow.
    pub fn totals(&self) -> Result<OrderTotals<'a>, TotalsError> {
        order_totals(&self.lines, self.currency, &self.shipping)
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine<'a>> {
        self.lines
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine<'a>> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Iterate over the lines in first-add order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Whether checkout may be started.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        !self.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the shipping policy of the cart.
    #[must_use]
    pub fn shipping_policy(&self) -> ShippingPolicy {
        self.shipping
    }
}
