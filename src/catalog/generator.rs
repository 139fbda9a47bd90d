//! Synthetic catalog generator
//!
//! Produces a demo catalog whose shape follows the storefront's seed data. A
//! fixed seed always yields the same catalog.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Badge, Category, Product, ProductId},
};

const DESCRIPTION: &str =
    "Elegant, carefully selected dropshipping product with fast delivery and secure checkout.";

/// Generate `count` products priced in `currency`, deterministically for `seed`.
///
/// # Errors
///
/// Returns a `CatalogError` if the generated catalog is invalid, which cannot
/// happen for generated ids but is surfaced rather than assumed.
pub fn generate(
    count: u32,
    seed: u64,
    currency: &'static Currency,
) -> Result<Catalog<'static>, CatalogError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let products: Vec<Product<'static>> = (0..count)
        .map(|i| generate_product(&mut rng, i, currency))
        .collect();

    let catalog = Catalog::new(currency, products)?;

    info!(
        products = catalog.len(),
        seed,
        currency = currency.iso_alpha_code,
        "generated catalog"
    );

    Ok(catalog)
}

fn generate_product(rng: &mut StdRng, i: u32, currency: &'static Currency) -> Product<'static> {
    let number = i + 1;

    let price = 99 + i64::from(i % 9) * 50 + rng.gen_range(0..=40);

    let old_price = rng
        .gen_bool(0.4)
        .then(|| Money::from_major(price + 80 + i64::from(i % 5) * 20, currency));

    // Half-star bonus, capped at the top of the scale.
    let bonus = if rng.gen_bool(0.3) { 5 } else { 0 };
    let rating = Decimal::new((30 + i64::from(i % 3) * 10 + bonus).min(50), 1);

    let category = Category::ALL
        .get(rng.gen_range(0..Category::ALL.len()))
        .copied()
        .unwrap_or(Category::Home);

    let badge = if rng.gen_bool(0.2) {
        Some(Badge::BestSeller)
    } else if rng.gen_bool(0.15) {
        Some(Badge::New)
    } else {
        None
    };

    Product {
        id: ProductId::new(format!("p-{number}")),
        name: format!("Product {number}"),
        description: DESCRIPTION.to_string(),
        price: Money::from_major(price, currency),
        old_price,
        rating,
        category,
        image: format!("https://picsum.photos/seed/ds{number}/800/800"),
        badge,
    }
}
