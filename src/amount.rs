//! Fixed-point money amounts with two decimal places.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Serialize;

use crate::error::WriteError;

/// The number of digits after the decimal point.
const SCALE: u32 = 2;

/// The largest number of digits before the decimal point, from `NUMERIC(12, 2)`.
const MAX_INTEGER_DIGITS: u32 = 10;

/// An amount of money with exactly two decimal places.
///
/// Values are rounded to cents on construction, so `Amount` compares and
/// displays the same way the database column stores it, e.g. `"12.5"` becomes
/// `12.50`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// An amount of zero.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount from a decimal, rounding to two decimal places.
    ///
    /// # Errors
    /// Returns a:
    /// - [WriteError::NegativeAmount] if `value` is below zero,
    /// - or [WriteError::AmountOutOfRange] if `value` has more than 10 digits
    ///   before the decimal point.
    pub fn new(value: Decimal) -> Result<Self, WriteError> {
        let amount = Self::new_unchecked(value);

        if amount.0.is_sign_negative() && !amount.0.is_zero() {
            return Err(WriteError::NegativeAmount(amount.0));
        }

        if amount.0.abs() >= Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS)) {
            return Err(WriteError::AmountOutOfRange(amount.0));
        }

        Ok(amount)
    }

    /// Create an amount without checking the sign or range.
    ///
    /// Used for values coming out of the database, such as sums, which have
    /// already been accepted by the storage layer.
    pub fn new_unchecked(value: Decimal) -> Self {
        let mut value = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(SCALE);

        Self(value)
    }

    /// Create an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, SCALE))
    }

    /// The amount as a decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// The amount as a float, for charting. Precision beyond cents is not
    /// needed for display.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = WriteError;

    /// Parse user input such as `"50"`, `"50.5"` or `"1234.56"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| WriteError::InvalidAmount(s.to_owned()))?;

        Self::new(value)
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |total, amount| total + amount)
    }
}

impl ToSql for Amount {
    /// Amounts are bound as text so SQLite's NUMERIC affinity converts them
    /// without going through a binary float on the Rust side.
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    /// A `NUMERIC` column hands back integers, reals or text depending on the
    /// value, and `SUM` over it returns an integer or a real.
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let decimal = match value {
            ValueRef::Integer(integer) => Decimal::from(integer),
            ValueRef::Real(real) => {
                Decimal::try_from(real).map_err(|error| FromSqlError::Other(Box::new(error)))?
            }
            ValueRef::Text(text) => {
                let text = std::str::from_utf8(text)
                    .map_err(|error| FromSqlError::Other(Box::new(error)))?;
                Decimal::from_str(text).map_err(|error| FromSqlError::Other(Box::new(error)))?
            }
            _ => return Err(FromSqlError::InvalidType),
        };

        Ok(Self::new_unchecked(decimal))
    }
}
