//! Fixed-precision prices
//!
//! Prices are stored in `NUMERIC(18,2)` columns. This module mirrors that
//! storage type so arithmetic performed in Rust agrees with arithmetic
//! performed by the database.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of fractional digits kept by a price
pub const PRICE_SCALE: u32 = 2;

/// Total number of significant digits allowed by the column type
pub const PRICE_PRECISION: u32 = 18;

/// Errors that can occur when constructing or adjusting a price
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price {0} exceeds NUMERIC({PRICE_PRECISION},{PRICE_SCALE})")]
    OutOfRange(Decimal),

    #[error("Overflow while applying {0}% to a price")]
    Overflow(Decimal),
}

/// A price with exactly two decimal places
///
/// Values are rounded half away from zero on construction, which is how
/// PostgreSQL coerces a wider numeric into `NUMERIC(18,2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Creates a price, rounding to two decimals
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` when the integer part needs more than
    /// sixteen digits.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let rounded = round(amount);
        if rounded.abs() >= max_magnitude() {
            return Err(PriceError::OutOfRange(amount));
        }
        Ok(Self(rounded))
    }

    /// Creates a price from an amount in cents
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, PRICE_SCALE))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Scales the price by a percentage: `price * (1 + percentage / 100)`
    ///
    /// A percentage of `10` raises the price by a tenth, `-25` lowers it by a
    /// quarter. The result is rounded back to two decimals.
    pub fn apply_percentage(&self, percentage: Decimal) -> Result<Self, PriceError> {
        let factor = Decimal::ONE
            .checked_add(percentage / dec!(100))
            .ok_or(PriceError::Overflow(percentage))?;
        let scaled = self
            .0
            .checked_mul(factor)
            .ok_or(PriceError::Overflow(percentage))?;
        Self::new(scaled)
    }
}

fn round(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

fn max_magnitude() -> Decimal {
    Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE))
}

impl Default for Price {
    fn default() -> Self {
        Self(Decimal::new(0, PRICE_SCALE))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Decimal {
        price.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rounds_half_away_from_zero() {
        assert_eq!(Price::new(dec!(10.005)).unwrap().amount(), dec!(10.01));
        assert_eq!(Price::new(dec!(-10.005)).unwrap().amount(), dec!(-10.01));
    }

    #[test]
    fn test_new_rejects_values_wider_than_column() {
        let result = Price::new(dec!(10000000000000000));
        assert!(matches!(result, Err(PriceError::OutOfRange(_))));
    }

    #[test]
    fn test_display_always_shows_two_decimals() {
        assert_eq!(Price::new(dec!(5)).unwrap().to_string(), "5.00");
    }
}
