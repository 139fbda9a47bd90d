//! Products

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// Stable, catalog-unique product identifier (e.g. `p-12`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Errors parsing product enumerations from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductParseError {
    /// The category name is not one of the known categories.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Product category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Home & living
    Home,

    /// Electronics and gadgets
    Tech,

    /// Beauty & care
    Beauty,

    /// Outdoor gear
    Outdoor,

    /// Training equipment
    Fitness,

    /// Pet supplies
    Pet,

    /// Children's products
    Kids,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Home,
        Category::Tech,
        Category::Beauty,
        Category::Outdoor,
        Category::Fitness,
        Category::Pet,
        Category::Kids,
    ];

    /// Lowercase identifier used in fixtures and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::Tech => "tech",
            Category::Beauty => "beauty",
            Category::Outdoor => "outdoor",
            Category::Fitness => "fitness",
            Category::Pet => "pet",
            Category::Kids => "kids",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ProductParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProductParseError::UnknownCategory(s.to_string()))
    }
}

/// Merchandising label shown on a product card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    /// Best seller
    BestSeller,

    /// Newly added
    New,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::BestSeller => f.write_str("Best seller"),
            Badge::New => f.write_str("New"),
        }
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Unique product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Shelf price
    pub price: Money<'a, Currency>,

    /// Previous price, shown struck through. Never used in totals.
    pub old_price: Option<Money<'a, Currency>>,

    /// Average rating, `0.0..=5.0`
    pub rating: Decimal,

    /// Product category
    pub category: Category,

    /// Opaque image reference
    pub image: String,

    /// Optional merchandising badge
    pub badge: Option<Badge>,
}
