//! Money

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors converting between decimal amounts and gateway amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyConversionError {
    /// The currency code is not a known ISO 4217 currency.
    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),

    /// The amount was negative.
    #[error("amount {0} is negative")]
    Negative(Decimal),

    /// The amount does not fit in an `i64` of minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Look up an ISO 4217 currency by its alphabetic code.
///
/// # Errors
///
/// Returns [`MoneyConversionError::UnknownCurrency`] when the code is not recognised.
pub fn currency(code: &str) -> Result<&'static Currency, MoneyConversionError> {
    iso::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| MoneyConversionError::UnknownCurrency(code.to_string()))
}

/// Round an amount to the number of decimal places used by `currency`.
#[must_use]
pub fn round_to_currency(amount: Decimal, currency: &Currency) -> Decimal {
    amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a decimal amount into integer minor units (e.g. paise for INR).
///
/// The amount is rounded half away from zero to the currency's exponent first.
///
/// # Errors
///
/// Returns an error when the amount is negative or too large for an `i64`.
pub fn to_minor_units(amount: Decimal, currency: &Currency) -> Result<i64, MoneyConversionError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyConversionError::Negative(amount));
    }

    let scale = Decimal::from(10_u64.pow(currency.exponent));

    round_to_currency(amount, currency)
        .checked_mul(scale)
        .and_then(|minor| minor.to_i64())
        .ok_or(MoneyConversionError::OutOfRange(amount))
}

/// Wrap a decimal amount for display, rounded to the currency's precision.
#[must_use]
pub fn display<'a>(amount: Decimal, currency: &'a Currency) -> Money<'a, Currency> {
    Money::from_decimal(round_to_currency(amount, currency), currency)
}
