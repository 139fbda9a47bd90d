//! Storefront configuration
//!
//! Settings come from the command line, environment variables and an optional
//! `.env` file, in that order of precedence.

use std::{num::NonZeroU32, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    catalog::fixtures::{FixtureError, parse_currency},
    checkout::{CheckoutDetails, PaymentMethod},
    pricing::ShippingPolicy,
    products::ProductId,
    projection::{CatalogQuery, CategoryFilter, SortKey},
};

/// Errors parsing configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A cart entry is not `ID` or `ID:QUANTITY` with a positive quantity.
    #[error("Invalid cart entry '{0}', expected ID or ID:QUANTITY")]
    InvalidCartEntry(String),
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Catalog source settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Fixture directory containing `products/<name>.yml`
    #[arg(long, env = "STOREFRONT_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Named catalog fixture to load
    #[arg(long, env = "STOREFRONT_CATALOG", default_value = "demo")]
    pub catalog: String,

    /// Generate a synthetic catalog with this many products instead of loading a fixture
    #[arg(long)]
    pub generate: Option<u32>,

    /// Seed for the synthetic catalog
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Currency for the synthetic catalog
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "SEK")]
    pub currency: String,
}

impl CatalogConfig {
    /// Currency for generated catalogs.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the currency code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        parse_currency(&self.currency)
    }
}

/// Shipping settings.
#[derive(Debug, Args)]
pub struct ShippingConfig {
    /// Subtotals strictly above this amount ship for free
    #[arg(long, env = "STOREFRONT_FREE_SHIPPING_OVER", default_value_t = 800)]
    pub free_shipping_over: u32,

    /// Flat shipping fee for other non-empty orders
    #[arg(long, env = "STOREFRONT_SHIPPING_FEE", default_value_t = 49)]
    pub shipping_fee: u32,
}

impl ShippingConfig {
    /// Shipping policy described by these settings.
    pub fn policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.free_shipping_over, self.shipping_fee)
    }
}

/// Storefront command-line configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog and cart", long_about = None)]
pub struct StorefrontConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Catalog source settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Shipping settings.
    #[command(flatten)]
    pub shipping: ShippingConfig,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Storefront actions
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products matching a query
    Browse(BrowseArgs),

    /// Fill a cart, show it, and complete a simulated order
    Checkout(CheckoutArgs),
}

/// Browse arguments
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Text matched against product name or description
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category to show, or "all"
    #[arg(short, long, default_value_t = CategoryFilter::All)]
    pub category: CategoryFilter,

    /// Sort order (featured, price-asc, price-desc, rating)
    #[arg(short, long, default_value_t = SortKey::Featured)]
    pub sort: SortKey,
}

impl BrowseArgs {
    /// Catalog query described by these arguments.
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            text: self.query.clone(),
            category: self.category,
            sort: self.sort,
        }
    }
}

/// A product and quantity to put in the cart, written `ID` or `ID:QUANTITY`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartEntry {
    /// Product to add
    pub product_id: ProductId,

    /// Units to add
    pub quantity: NonZeroU32,
}

impl FromStr for CartEntry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCartEntry(s.to_string());

        let (id, quantity) = match s.trim().split_once(':') {
            Some((id, quantity)) => (
                id,
                quantity
                    .parse::<NonZeroU32>()
                    .map_err(|_err| invalid())?,
            ),
            None => (s.trim(), NonZeroU32::MIN),
        };

        if id.is_empty() {
            return Err(invalid());
        }

        Ok(CartEntry {
            product_id: ProductId::from(id),
            quantity,
        })
    }
}

/// Checkout arguments
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Product to add, as ID or ID:QUANTITY (repeatable)
    #[arg(short, long = "add", required = true)]
    pub add: Vec<CartEntry>,

    /// Contact email
    #[arg(long, default_value = "")]
    pub email: String,

    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,

    /// City
    #[arg(long, default_value = "")]
    pub city: String,

    /// Postal code
    #[arg(long, default_value = "")]
    pub zip: String,

    /// Payment method (card, paypal, swish)
    #[arg(long, default_value_t = PaymentMethod::Card)]
    pub payment: PaymentMethod,
}

impl CheckoutArgs {
    /// Checkout details described by these arguments.
    pub fn details(&self) -> CheckoutDetails {
        CheckoutDetails {
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
            payment_method: self.payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rusty_money::iso::NOK;
    use testresult::TestResult;

    use crate::products::Category;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        StorefrontConfig::command().debug_assert();
    }

    #[test]
    fn cart_entry_defaults_to_one_unit() -> TestResult {
        let entry: CartEntry = "p-4".parse()?;

        assert_eq!(entry.product_id, ProductId::from("p-4"));
        assert_eq!(entry.quantity, NonZeroU32::MIN);

        Ok(())
    }

    #[test]
    fn cart_entry_reads_quantity() -> TestResult {
        let entry: CartEntry = "p-4:3".parse()?;

        assert_eq!(entry.quantity.get(), 3);

        Ok(())
    }

    #[test]
    fn cart_entry_rejects_zero_and_empty_ids() {
        assert!("p-4:0".parse::<CartEntry>().is_err());
        assert!("p-4:-2".parse::<CartEntry>().is_err());
        assert!(":2".parse::<CartEntry>().is_err());
    }

    #[test]
    fn parses_browse_command() -> TestResult {
        let config = StorefrontConfig::try_parse_from([
            "storefront",
            "--generate",
            "20",
            "--currency",
            "NOK",
            "browse",
            "--query",
            "lamp",
            "--category",
            "home",
            "--sort",
            "price-desc",
        ])?;

        assert_eq!(config.catalog.generate, Some(20));
        assert_eq!(config.catalog.currency()?, NOK);

        let Command::Browse(args) = config.command else {
            return Err("expected browse command".into());
        };

        assert_eq!(
            args.query(),
            CatalogQuery {
                text: "lamp".to_string(),
                category: CategoryFilter::Only(Category::Home),
                sort: SortKey::PriceDesc,
            }
        );

        Ok(())
    }

    #[test]
    fn parses_checkout_command() -> TestResult {
        let config = StorefrontConfig::try_parse_from([
            "storefront",
            "--free-shipping-over",
            "500",
            "--shipping-fee",
            "29",
            "checkout",
            "--add",
            "p-1",
            "--add",
            "p-2:2",
            "--name",
            "Alex",
            "--payment",
            "swish",
        ])?;

        assert_eq!(config.shipping.policy(), ShippingPolicy::new(500, 29));

        let Command::Checkout(args) = config.command else {
            return Err("expected checkout command".into());
        };

        assert_eq!(args.add.len(), 2);
        assert_eq!(args.details().name, "Alex");
        assert_eq!(args.details().payment_method, PaymentMethod::Swish);

        Ok(())
    }

    #[test]
    fn rejects_negative_shipping_settings() {
        for flag in ["--shipping-fee=-49", "--free-shipping-over=-1"] {
            let result = StorefrontConfig::try_parse_from(["storefront", flag, "browse"]);

            assert!(result.is_err(), "{flag} should be rejected");
        }
    }
}
