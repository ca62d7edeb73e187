//! Prelude
//!
//! Re-exports the types most callers need to price carts and move orders along.

pub use crate::{
    carts::{CartEntry, CartLimitError, CartLimits, CartSnapshot, SnapshotLine},
    invoice::{Invoice, InvoiceAddress, InvoiceError, InvoiceLine},
    money::MoneyConversionError,
    orders::{
        FulfillmentStatus, ParseStatusError, PaymentMethod, PaymentStatus, StatusAxis,
        TransitionError,
    },
    pricing::ListPrice,
};
