//! Amount type for prices and sale amounts.
//!
//! This module provides the `Amount` type which wraps `Decimal`, refuses negative values, and
//! handles parsing of user-entered text that may carry a currency sign.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Currency signs that are tolerated, and dropped, when parsing user input.
const CURRENCY_SIGNS: &[char] = &['€', '$'];

/// The largest accepted amount, one quadrillion. Sums of any realistic number of amounts stay far
/// below `Decimal::MAX`.
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// A non-negative monetary value of at most one quadrillion.
///
/// In the data file an `Amount` is a plain JSON number, e.g. `3.5`. Only values that are read back
/// unchanged from that number are accepted, which limits amounts to about 15 significant digits.
///
/// # Examples
///
/// ```
/// # use sales_ledger::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str(" 3.50 € ").unwrap();
/// assert_eq!(amount.to_string(), "3.50");
/// assert!(Amount::from_str("-1").is_err());
/// assert!(Amount::from_str("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// # Errors
    ///
    /// - `Negative` if `value` is below zero.
    /// - `TooLarge` if `value` exceeds one quadrillion.
    /// - `TooPrecise` if `value` would change when written to and read from the data file.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_zero() {
            return Ok(Self::ZERO);
        }
        if value.is_sign_negative() {
            return Err(AmountError::Negative(value));
        }
        if value > Decimal::from(MAX_AMOUNT) {
            return Err(AmountError::TooLarge(value));
        }
        if from_json_number(value) != Some(value) {
            return Err(AmountError::TooPrecise(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("no amount was given")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{0} is negative")]
    Negative(Decimal),
    #[error("{0} is larger than one quadrillion")]
    TooLarge(Decimal),
    #[error("{0} has more significant digits than can be stored")]
    TooPrecise(Decimal),
}

/// The value `value` has after a trip through the `f64` stored in the data file. This mirrors
/// `rust_decimal::serde::float`, which parses the shortest `f64` representation.
fn from_json_number(value: Decimal) -> Option<Decimal> {
    let float = value.to_f64()?;
    Decimal::from_str(&float.to_string()).ok()
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_start_matches(CURRENCY_SIGNS)
            .trim_end_matches(CURRENCY_SIGNS)
            .trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        // Scientific notation is accepted because float-typed front ends can produce it.
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;

        Amount::new(value)
    }
}

impl fmt::Display for Amount {
    /// Two decimal places with thousands separators, e.g. `1,234.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < Decimal::from(1000) {
            write!(f, "{:.2}", self.0)
        } else {
            write!(
                f,
                "{}",
                format_num::format_num!(",.2", self.0.to_f64().unwrap_or_default())
            )
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
