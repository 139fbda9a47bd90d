//! Shopping session
//!
//! A session ties one cart and the current browse query to a catalog. Front
//! ends hold a session and re-read its cart, totals and product view after
//! every action.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::{
    cart::{Cart, CartChange, CartError},
    catalog::Catalog,
    checkout::{CheckoutDetails, CheckoutError, OrderConfirmation, complete_order},
    pricing::{OrderTotals, ShippingPolicy, TotalsError},
    products::{Product, ProductId},
    projection::{CatalogQuery, project},
};

/// Errors raised by session actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// One shopper's session.
#[derive(Debug)]
pub struct Session<'c, 'a> {
    catalog: &'c Catalog<'a>,
    cart: Cart<'a>,
    query: CatalogQuery,
}

impl<'c, 'a> Session<'c, 'a> {
    /// Start a session with an empty cart and the default query.
    pub fn new(catalog: &'c Catalog<'a>, shipping: ShippingPolicy) -> Self {
        Self {
            catalog,
            cart: Cart::with_policy(catalog.currency(), shipping),
            query: CatalogQuery::default(),
        }
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the product is unknown or cannot be added.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: NonZeroU32,
    ) -> Result<CartChange, SessionError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| SessionError::UnknownProduct(product_id.clone()))?;

        Ok(self.cart.add_quantity(product, quantity)?)
    }

    /// Remove a product's line from the cart.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> CartChange {
        self.cart.remove(product_id)
    }

    /// Set a cart line's quantity (clamped to at least one).
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> CartChange {
        self.cart.set_quantity(product_id, quantity)
    }

    /// Replace the browse query.
    pub fn set_query(&mut self, query: CatalogQuery) {
        self.query = query;
    }

    /// Current browse query.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Products matching the current query, in display order.
    pub fn visible_products(&self) -> Vec<&'c Product<'a>> {
        project(self.catalog, &self.query)
    }

    /// The session's cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The catalog being browsed.
    pub fn catalog(&self) -> &'c Catalog<'a> {
        self.catalog
    }

    /// Current cart totals.
    ///
    /// # Errors
    ///
    /// Returns a `TotalsError` if the totals overflow.
    pub fn totals(&self) -> Result<OrderTotals<'a>, TotalsError> {
        self.cart.totals()
    }

    /// Complete the order, clearing the cart on success.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the cart is empty.
    pub fn checkout(
        &mut self,
        details: CheckoutDetails,
    ) -> Result<OrderConfirmation<'a>, CheckoutError> {
        complete_order(&mut self.cart, details)
    }
}
