//! Catalog
//!
//! The catalog is an ordered, read-only sequence of products. Its order is the
//! "featured" order used by the browse view.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId};

pub mod fixtures;
pub mod generator;

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A product is priced in another currency (product, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Product catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a catalog, preserving the order of `products`.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if an id is repeated or a product is priced in
    /// another currency.
    pub fn new(
        currency: &'static Currency,
        products: impl Into<Vec<Product<'a>>>,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            let product_currency = product.price.currency();

            if product_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.id.clone(),
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if index.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Catalog {
            products,
            index,
            currency,
        })
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product<'a>> {
        self.index
            .get(id)
            .and_then(|&idx| self.products.get(idx))
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Get the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{
        Money,
        iso::{EUR, SEK},
    };
    use testresult::TestResult;

    use crate::products::Category;

    use super::*;

    fn product(id: &str) -> Product<'static> {
        Product {
            id: ProductId::from(id),
            name: id.to_string(),
            description: String::new(),
            price: Money::from_major(100, SEK),
            old_price: None,
            rating: Decimal::new(35, 1),
            category: Category::Pet,
            image: String::new(),
            badge: None,
        }
    }

    #[test]
    fn new_preserves_order_and_indexes_ids() -> TestResult {
        let catalog = Catalog::new(SEK, [product("p-3"), product("p-1"), product("p-2")])?;

        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["p-3", "p-1", "p-2"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get(&ProductId::from("p-1")).map(|p| p.name.as_str()),
            Some("p-1")
        );
        assert!(catalog.get(&ProductId::from("p-9")).is_none());

        Ok(())
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Catalog::new(SEK, [product("p-1"), product("p-1")]);

        assert_eq!(
            result.err(),
            Some(CatalogError::DuplicateProduct(ProductId::from("p-1")))
        );
    }

    #[test]
    fn new_rejects_foreign_currency() {
        let mut euro = product("p-2");
        euro.price = Money::from_major(10, EUR);

        let result = Catalog::new(SEK, [product("p-1"), euro]);

        assert_eq!(
            result.err(),
            Some(CatalogError::CurrencyMismatch(
                ProductId::from("p-2"),
                EUR.iso_alpha_code,
                SEK.iso_alpha_code
            ))
        );
    }

    #[test]
    fn empty_catalog_is_allowed() -> TestResult {
        let catalog = Catalog::new(SEK, Vec::new())?;

        assert!(catalog.is_empty());
        assert_eq!(catalog.currency(), SEK);

        Ok(())
    }
}
