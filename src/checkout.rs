//! Checkout
//!
//! Payment is simulated: a non-empty cart always completes, and the collected
//! contact and payment details are carried through untouched.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartLine},
    pricing::{OrderTotals, TotalsError},
};

/// Errors that can occur when completing an order.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Order totals could not be calculated.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// Unknown payment method name.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

/// Payment method selected at checkout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Card payment
    #[default]
    Card,

    /// `PayPal` wallet
    PayPal,

    /// Swish mobile payment
    Swish,
}

impl PaymentMethod {
    /// Identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::Swish => "swish",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::PayPal),
            "swish" => Ok(PaymentMethod::Swish),
            _ => Err(CheckoutError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Contact, shipping and payment details collected by the checkout form.
///
/// None of these fields influence totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Contact email
    pub email: String,

    /// Full name
    pub name: String,

    /// Phone number, also used for Swish
    pub phone: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub zip: String,

    /// Selected payment method
    pub payment_method: PaymentMethod,
}

/// A completed order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderConfirmation<'a> {
    /// Lines as they were at checkout
    pub lines: Vec<CartLine<'a>>,

    /// Totals as they were at checkout
    pub totals: OrderTotals<'a>,

    /// Details passed through from the checkout form
    pub details: CheckoutDetails,
}

/// Complete the order for a cart and clear it.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines; the cart is left untouched.
/// - [`CheckoutError::Totals`]: totals overflowed; the cart is left untouched.
pub fn complete_order<'a>(
    cart: &mut Cart<'a>,
    details: CheckoutDetails,
) -> Result<OrderConfirmation<'a>, CheckoutError> {
    if !cart.can_checkout() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = cart.totals()?;
    let lines = cart.lines().to_vec();

    cart.clear();

    info!(
        lines = lines.len(),
        total = %totals.total,
        payment_method = %details.payment_method,
        "order completed"
    );

    Ok(OrderConfirmation {
        lines,
        totals,
        details,
    })
}
