//! Cart lines

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::TotalsError,
    products::{Product, ProductId},
};

/// One product's entry in the cart.
///
/// Name, price and image are captured when the product is first added; later
/// catalog changes do not reach existing lines.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine<'a> {
    product_id: ProductId,
    name: String,
    price: Money<'a, Currency>,
    image: String,
    quantity: NonZeroU32,
}

impl<'a> CartLine<'a> {
    /// Creates a new line.
    pub fn new(
        product_id: ProductId,
        name: String,
        price: Money<'a, Currency>,
        image: String,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            product_id,
            name,
            price,
            image,
            quantity,
        }
    }

    /// Snapshot a product into a new line.
    pub fn from_product(product: &Product<'a>, quantity: NonZeroU32) -> Self {
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.image.clone(),
            quantity,
        )
    }

    /// Returns the product id of the line
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the product name captured at first add
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price captured at first add
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the image reference captured at first add
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the quantity, always at least one
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    pub(crate) fn increase(&mut self, quantity: NonZeroU32) {
        self.quantity = self.quantity.saturating_add(quantity.get());
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::Overflow`] if the product does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalsError> {
        let total = self.price.mul(self.quantity.get())?;

        total.try_to_minor_units()?;

        Ok(total)
    }
}
