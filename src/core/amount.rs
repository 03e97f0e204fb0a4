//! Monetary amounts as entered by the user, converted to integer cents.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Largest cents value that fits a 15-digit monetary field.
pub const MAX_CENTS: u64 = 999_999_999_999_999;

/// Error returned when an amount string cannot be turned into cents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount '{value}': {reason}")]
pub struct AmountError {
    /// The rejected input.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl AmountError {
    fn new(value: &str, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Check the `digits[(.|,)dd]` shape: no sign, no thousands separators,
/// and either no fraction or exactly two fraction digits.
pub fn is_amount_format(value: &str) -> bool {
    let (int_part, frac_part) = match value.find(['.', ',']) {
        Some(pos) => (&value[..pos], Some(&value[pos + 1..])),
        None => (value, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if int_part.is_empty() || !all_digits(int_part) {
        return false;
    }
    match frac_part {
        Some(frac) => frac.len() == 2 && all_digits(frac),
        None => true,
    }
}

/// Convert an amount string to cents.
///
/// Uses the fraction digits verbatim, so `"123.45"` is exactly `12345` and
/// `"10"` is `1000`. Fails on malformed input and on values that do not fit
/// a 15-digit cents field.
pub fn to_cents(value: &str) -> Result<u64, AmountError> {
    if !is_amount_format(value) {
        return Err(AmountError::new(
            value,
            "expected digits with an optional 2-digit fraction",
        ));
    }

    let amount = Decimal::from_str_exact(&value.replace(',', "."))
        .map_err(|_| AmountError::new(value, "too many digits"))?;
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.trunc().to_u64())
        .ok_or_else(|| AmountError::new(value, "too many digits"))?;

    if cents > MAX_CENTS {
        return Err(AmountError::new(
            value,
            "exceeds 15 digits when expressed in cents",
        ));
    }
    Ok(cents)
}

/// An amount in cents (hundredths of a real).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub u64);

impl Cents {
    /// Add two amounts, failing if the sum leaves the 15-digit range.
    pub fn checked_add(self, other: Cents) -> Option<Cents> {
        self.0
            .checked_add(other.0)
            .filter(|sum| *sum <= MAX_CENTS)
            .map(Cents)
    }
}

impl FromStr for Cents {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_cents(s).map(Cents)
    }
}
