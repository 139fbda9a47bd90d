//! Receipt
//!
//! Terminal rendering for the product view, the cart and completed orders.
//! Currency formatting happens here and nowhere in the cart engine.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    checkout::OrderConfirmation,
    pricing::{OrderTotals, TotalsError},
    products::Product,
};

/// Errors that can occur when rendering.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating totals or line totals.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// Error writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write the product view as a table.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_products(
    mut out: impl io::Write,
    products: &[&Product<'_>],
) -> Result<(), ReceiptError> {
    if products.is_empty() {
        writeln!(out, "No products match.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Category", "Rating", "Price", "Was", ""]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            product.rating.to_string(),
            format!("{}", product.price),
            product
                .old_price
                .map(|old_price| format!("{old_price}"))
                .unwrap_or_default(),
            product
                .badge
                .map(|badge| badge.to_string())
                .unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "{} products", products.len())?;

    Ok(())
}

/// Write the cart lines and totals.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if totals overflow or the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    write_lines(&mut out, cart.lines())?;
    write_summary(&mut out, &cart.totals()?, cart.item_count())?;

    Ok(())
}

/// Write an order confirmation.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_confirmation(
    mut out: impl io::Write,
    confirmation: &OrderConfirmation<'_>,
) -> Result<(), ReceiptError> {
    let details = &confirmation.details;

    writeln!(out, "Thank you for your order! (simulated)")?;

    if !details.name.is_empty() {
        writeln!(out, "Ship to: {}", details.name)?;
    }

    if !details.address.is_empty() {
        writeln!(out, "         {}, {} {}", details.address, details.zip, details.city)?;
    }

    if !details.email.is_empty() {
        writeln!(out, "Receipt: {}", details.email)?;
    }

    writeln!(out, "Payment: {}", details.payment_method)?;

    let item_count: u64 = confirmation
        .lines
        .iter()
        .map(|line| u64::from(line.quantity().get()))
        .sum();

    write_lines(&mut out, &confirmation.lines)?;
    write_summary(&mut out, &confirmation.totals, item_count)?;

    Ok(())
}

fn write_lines(out: &mut impl io::Write, lines: &[CartLine<'_>]) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

    for (idx, line) in lines.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.name().to_string(),
            line.quantity().to_string(),
            format!("{}", line.price()),
            format!("{}", line.line_total()?),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_summary(
    out: &mut impl io::Write,
    totals: &OrderTotals<'_>,
    item_count: u64,
) -> Result<(), ReceiptError> {
    let rows = [
        (" Items:", item_count.to_string()),
        (" Subtotal:", format!("{}", totals.subtotal)),
        (" Shipping:", shipping_label(&totals.shipping)),
        (" Total:", format!("{}", totals.total)),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")?;
    }

    writeln!(out)?;

    Ok(())
}

fn shipping_label(shipping: &Money<'_, Currency>) -> String {
    if shipping.is_zero() {
        "Free".to_string()
    } else {
        format!("{shipping}")
    }
}
