//! Storefront command-line front end

use std::io;

use anyhow::{Context, Result};
use tracing::info;

use storefront::{
    catalog::{Catalog, fixtures::CatalogFixtures, generator::generate},
    config::{BrowseArgs, CatalogConfig, CheckoutArgs, Command, StorefrontConfig},
    observability::init_subscriber,
    pricing::ShippingPolicy,
    receipt::{write_cart, write_confirmation, write_products},
    session::Session,
};

fn main() -> Result<()> {
    let config = StorefrontConfig::load().unwrap_or_else(|err| err.exit());

    init_subscriber(&config.logging)?;

    let catalog = load_catalog(&config.catalog)?;
    let shipping = config.shipping.policy();

    match config.command {
        Command::Browse(args) => browse(&catalog, shipping, &args),
        Command::Checkout(args) => checkout(&catalog, shipping, &args),
    }
}

fn load_catalog(config: &CatalogConfig) -> Result<Catalog<'static>> {
    if let Some(count) = config.generate {
        return Ok(generate(count, config.seed, config.currency()?)?);
    }

    CatalogFixtures::with_base_path(&config.fixtures)
        .load(&config.catalog)
        .with_context(|| format!("loading catalog fixture '{}'", config.catalog))
}

fn browse(catalog: &Catalog<'_>, shipping: ShippingPolicy, args: &BrowseArgs) -> Result<()> {
    let mut session = Session::new(catalog, shipping);

    session.set_query(args.query());

    let products = session.visible_products();

    info!(
        query = %args.query,
        category = %args.category,
        sort = %args.sort,
        matches = products.len(),
        "browsing catalog"
    );

    write_products(io::stdout().lock(), &products)?;

    Ok(())
}

fn checkout(catalog: &Catalog<'_>, shipping: ShippingPolicy, args: &CheckoutArgs) -> Result<()> {
    let mut session = Session::new(catalog, shipping);

    for entry in &args.add {
        session
            .add_to_cart(&entry.product_id, entry.quantity)
            .with_context(|| format!("adding {} to cart", entry.product_id))?;
    }

    let mut out = io::stdout().lock();

    write_cart(&mut out, session.cart())?;

    let confirmation = session.checkout(args.details())?;

    write_confirmation(&mut out, &confirmation)?;

    Ok(())
}
