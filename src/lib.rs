//! Storefront
//!
//! Storefront is the catalog, cart and checkout core of a small web shop: products are browsed
//! through a filtered, sorted projection of the catalog, collected into a cart whose totals are
//! always derived from its lines, and checked out through a simulated payment step.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod projection;
pub mod receipt;
pub mod session;
