//! Catalog projection
//!
//! Filters and sorts the catalog into the product view shown to shoppers.

use std::{cmp::Reverse, fmt, str::FromStr};

use thiserror::Error;

use crate::{
    catalog::Catalog,
    products::{Category, Product, ProductParseError},
};

/// Errors parsing projection parameters from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// Unknown sort key.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Unknown category filter.
    #[error(transparent)]
    Category(#[from] ProductParseError),
}

/// Category filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product passes this filter.
    pub fn matches(self, product: &Product<'_>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }

        Ok(CategoryFilter::Only(s.parse()?))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Sort order for the product view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Catalog order
    #[default]
    Featured,

    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// Highest rated first
    Rating,
}

impl SortKey {
    /// Identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Rating => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" => Ok(SortKey::Featured),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            other => Err(ProjectionError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browse query: free text, category and sort order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive text matched against name or description
    pub text: String,

    /// Category filter
    pub category: CategoryFilter,

    /// Sort order
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Whether a product passes the text and category filters.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        self.category.matches(product) && matches_text(product, &self.text.to_lowercase())
    }
}

fn matches_text(product: &Product<'_>, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Filter and sort the catalog. The catalog itself is left untouched.
///
/// Sorting is stable, so products with equal keys keep their catalog order.
pub fn project<'c, 'a>(catalog: &'c Catalog<'a>, query: &CatalogQuery) -> Vec<&'c Product<'a>> {
    let needle = query.text.to_lowercase();

    let mut view: Vec<&Product<'a>> = catalog
        .iter()
        .filter(|product| query.category.matches(product) && matches_text(product, &needle))
        .collect();

    match query.sort {
        SortKey::Featured => {}
        SortKey::PriceAsc => view.sort_by_key(|product| *product.price.amount()),
        SortKey::PriceDesc => view.sort_by_key(|product| Reverse(*product.price.amount())),
        SortKey::Rating => view.sort_by_key(|product| Reverse(product.rating)),
    }

    view
}
