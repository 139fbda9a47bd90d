//! Catalog Fixtures
//!
//! Catalogs can be loaded from YAML files laid out as
//! `<base>/products/<name>.yml`:
//!
//! ```yaml
//! currency: SEK
//! products:
//!   - id: p-1
//!     name: Desk lamp
//!     description: Warm light for late evenings.
//!     price: 249 SEK
//!     old_price: 329 SEK
//!     rating: 4.5
//!     category: home
//!     image: https://example.com/lamp.jpg
//!     badge: best-seller
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, DKK, EUR, GBP, NOK, SEK, USD},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Badge, Category, Product, ProductId},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Prices must be greater than zero
    #[error("Price must be positive: {0}")]
    NonPositivePrice(String),

    /// Prices must be a whole amount of the currency
    #[error("Price must be a whole amount: {0}")]
    FractionalPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Rating outside `0..=5`
    #[error("Rating for {0} must be between 0 and 5, got {1}")]
    InvalidRating(ProductId, f64),

    /// Currency mismatch between a product and the fixture currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Catalog validation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code all prices are given in
    pub currency: String,

    /// Products in featured order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "249 SEK")
    pub price: String,

    /// Previous price (e.g., "329 SEK")
    #[serde(default)]
    pub old_price: Option<String>,

    /// Rating between 0 and 5
    pub rating: f64,

    /// Product category
    pub category: Category,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Merchandising badge
    #[serde(default)]
    pub badge: Option<Badge>,
}

impl ProductFixture {
    fn into_product(self, currency: &'static Currency) -> Result<Product<'static>, FixtureError> {
        let price = parse_money(&self.price, currency)?;

        let old_price = self
            .old_price
            .as_deref()
            .map(|old_price| parse_money(old_price, currency))
            .transpose()?;

        let rating = Decimal::from_f64(self.rating)
            .filter(|rating| (Decimal::ZERO..=Decimal::new(5, 0)).contains(rating))
            .map(|rating| rating.round_dp(1))
            .ok_or_else(|| FixtureError::InvalidRating(self.id.clone(), self.rating))?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price,
            old_price,
            rating,
            category: self.category,
            image: self.image,
            badge: self.badge,
        })
    }
}

/// Look up a supported ISO currency by code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "SEK" => Ok(SEK),
        "NOK" => Ok(NOK),
        "DKK" => Ok(DKK),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        _ => Err(FixtureError::UnknownCurrency(code.to_string())),
    }
}

/// Parse price string (e.g., "249 SEK") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, is not positive or is not a
/// whole amount, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(FixtureError::NonPositivePrice(s.to_string()));
    }

    if !amount.fract().is_zero() {
        return Err(FixtureError::FractionalPrice(s.to_string()));
    }

    let currency = parse_currency(currency_code)?;

    let minor_units = Money::from_decimal(amount, currency)
        .try_to_minor_units()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

fn parse_money(s: &str, currency: &'static Currency) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, price_currency) = parse_price(s)?;

    if price_currency != currency {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns a `FixtureError` if the YAML is malformed or any product is invalid.
pub fn catalog_from_yaml(contents: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;
    let currency = parse_currency(&fixture.currency)?;

    let products = fixture
        .products
        .into_iter()
        .map(|product| product.into_product(currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(currency, products)?)
}

/// Loads named catalogs from a fixture directory.
#[derive(Debug, Clone)]
pub struct CatalogFixtures {
    base_path: PathBuf,
}

impl CatalogFixtures {
    /// Use the given fixture directory.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Fixture directory in use.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load `products/<name>.yml` from the fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is invalid.
    pub fn load(&self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let catalog = catalog_from_yaml(&contents)?;

        info!(
            path = %file_path.display(),
            products = catalog.len(),
            currency = catalog.currency().iso_alpha_code,
            "loaded catalog fixture"
        );

        Ok(catalog)
    }
}

impl Default for CatalogFixtures {
    fn default() -> Self {
        Self::with_base_path("./fixtures")
    }
}
