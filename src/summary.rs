//! Order Summary

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::Cart;

/// Errors that can occur while rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Writing to the output failed.
    #[error("failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// Estimated tax rate applied when none is configured (10%).
pub fn default_tax_rate() -> Percentage {
    Percentage::from(Decimal::new(1, 1))
}

/// Pre-checkout totals for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    item_count: u64,
    subtotal: Decimal,
    tax_rate: Decimal,
    tax: Decimal,
    total: Decimal,
}

impl OrderSummary {
    /// Compute totals for `cart` with the given estimated tax rate.
    pub fn new(cart: &Cart, tax_rate: Percentage) -> Self {
        let tax_rate = tax_rate * Decimal::ONE;
        let subtotal = cart.subtotal();
        let tax = subtotal.saturating_mul(tax_rate);

        Self {
            item_count: cart.total_item_count(),
            subtotal,
            tax_rate,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of line subtotals, before tax.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Estimated tax on the subtotal.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Subtotal plus estimated tax.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Tax rate as percent points, e.g. `10` for a 10% rate.
    pub fn tax_percent_points(&self) -> Decimal {
        (self.tax_rate * Decimal::ONE_HUNDRED).normalize()
    }

    /// Render the cart lines and these totals as a table.
    ///
    /// Amounts are rounded to the currency's minor unit for display only.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Io`] if writing to `out` fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &Cart,
        currency: &'static Currency,
    ) -> Result<(), SummaryError> {
        if cart.is_empty() {
            writeln!(out, "Your cart is empty")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Brand", "Price", "Qty", "Subtotal"]);

        for (idx, item) in cart.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.title.clone(),
                item.brand.clone().unwrap_or_default(),
                money(item.price, currency),
                item.quantity.to_string(),
                money(item.line_subtotal(), currency),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}")?;

        let lines = [
            (format!("Items ({}):", self.item_count), money(self.subtotal, currency)),
            (
                format!("Estimated Tax ({}%):", self.tax_percent_points()),
                money(self.tax, currency),
            ),
            ("Total:".to_string(), money(self.total, currency)),
        ];

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in lines {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
        }

        Ok(())
    }
}

/// Format an amount in `currency`, rounded to its minor unit.
pub(crate) fn money(amount: Decimal, currency: &'static Currency) -> String {
    let mut rounded = amount.round_dp(currency.exponent);

    rounded.rescale(currency.exponent);

    match i64::try_from(rounded.mantissa()) {
        Ok(minor) => Money::from_minor(minor, currency).to_string(),
        Err(_overflow) => format!("{rounded} {}", currency.iso_alpha_code),
    }
}
