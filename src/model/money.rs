//! Fixed-point money and order quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),
    #[error("amount is not a decimal number: {0}")]
    Invalid(String),
    #[error("amount overflows the supported range")]
    Overflow,
    #[error("quantity must be a positive integer")]
    ZeroQuantity,
}

/// A non-negative decimal amount of currency.
///
/// Serialized as a string (`"10.00"`) so no binary floating point is ever involved.
///
/// ```
/// use food_catalog::model::Money;
///
/// let bun: Money = "10.00".parse().unwrap();
/// assert_eq!(bun.to_string(), "10.00");
/// assert!("-1".parse::<Money>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Builds an amount from an integer number of hundredths (`1050` is `10.50`).
    pub fn from_minor(minor: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(minor, 2))
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    pub fn times(self, quantity: Quantity) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(Decimal::from(quantity.get()))
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| MoneyError::Invalid(s.to_string()))?;
        Self::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A positive line-item quantity. Defaults to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: u32) -> Result<Self, MoneyError> {
        if value == 0 {
            return Err(MoneyError::ZeroQuantity);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = MoneyError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
