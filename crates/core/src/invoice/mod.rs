//! Invoice
//!
//! Printable invoice documents for placed orders. The A4 text layout is written with
//! `tabled`; [`typst`] produces the source of the PDF version.

use std::io;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    money,
    orders::{PaymentMethod, PaymentStatus},
};

pub mod typst;

/// Errors that can occur when writing an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The writer failed.
    #[error("failed to write invoice: {0}")]
    Io(#[from] io::Error),
}

/// Name and postal details printed on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoiceAddress {
    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// Country.
    pub country: String,

    /// Postal code.
    pub zip_code: String,
}

impl InvoiceAddress {
    fn lines(&self) -> Vec<String> {
        [
            self.name.clone(),
            self.address.clone(),
            format!("{} {}", self.city, self.zip_code).trim().to_string(),
            self.country.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
    }
}

/// One purchased product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    /// Product name at time of order.
    pub description: String,

    /// Units purchased.
    pub quantity: u32,

    /// Unit price frozen at time of order.
    pub unit_price: Decimal,
}

impl InvoiceLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Invoice for a single order.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// Invoice number (the order id).
    pub number: String,

    /// When the order was placed.
    pub issued_at: Timestamp,

    /// Currency of every amount.
    pub currency: &'static Currency,

    /// Billing party.
    pub billing: InvoiceAddress,

    /// Delivery address.
    pub shipping: InvoiceAddress,

    /// How the order is paid.
    pub payment_method: PaymentMethod,

    /// Payment state when the invoice was produced.
    pub payment_status: PaymentStatus,

    /// Purchased products.
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    /// Sum of all line amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(InvoiceLine::amount).sum()
    }

    /// Issue date formatted for print.
    #[must_use]
    pub fn issued_on(&self) -> String {
        self.issued_at.strftime("%d %B %Y").to_string()
    }

    fn format_amount(&self, amount: Decimal) -> String {
        money::display(amount, self.currency).to_string()
    }

    /// Write the invoice as a plain text A4 page.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if the writer fails.
    pub fn write_a4(&self, mut out: impl io::Write) -> Result<(), InvoiceError> {
        writeln!(out, "INVOICE {}", self.number)?;
        writeln!(out, "Date: {}", self.issued_on())?;
        writeln!(
            out,
            "Payment: {} ({})",
            self.payment_method, self.payment_status
        )?;
        writeln!(out)?;

        writeln!(out, "{}", self.addresses_table())?;
        writeln!(out)?;
        writeln!(out, "{}", self.lines_table())?;

        Ok(())
    }

    fn addresses_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Bill to", "Ship to"]);

        let billing = self.billing.lines();
        let shipping = self.shipping.lines();

        builder.push_record([billing.join("\n"), shipping.join("\n")]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());

        table.to_string()
    }

    fn lines_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Qty", "Unit price", "Amount"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("{}", idx + 1),
                line.description.clone(),
                line.quantity.to_string(),
                self.format_amount(line.unit_price),
                self.format_amount(line.amount()),
            ]);
        }

        builder.push_record([
            String::new(),
            "Total".to_string(),
            String::new(),
            String::new(),
            self.format_amount(self.total()),
        ]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        table.to_string()
    }
}
