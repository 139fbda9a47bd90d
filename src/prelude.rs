//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartChange, CartError, CartLine},
    catalog::{
        Catalog, CatalogError,
        fixtures::{CatalogFixtures, FixtureError},
        generator::generate,
    },
    checkout::{CheckoutDetails, CheckoutError, OrderConfirmation, PaymentMethod, complete_order},
    pricing::{OrderTotals, ShippingPolicy, TotalsError},
    products::{Badge, Category, Product, ProductId},
    projection::{CatalogQuery, CategoryFilter, SortKey, project},
    receipt::ReceiptError,
    session::{Session, SessionError},
};
