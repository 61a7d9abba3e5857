//! Money type for representing line-item amounts and rates
//!
//! Wraps a `rust_decimal::Decimal` so that sums of many line items never pick
//! up floating-point drift. Money carries no currency: the currency of an
//! amount is the resolved currency of the section it belongs to.
//!
//! Arithmetic saturates at the `Decimal` bounds instead of panicking.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A monetary amount in the major unit of its (external) currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create Money from a decimal amount
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create Money from a whole number of major units
    ///
    /// # Examples
    /// ```
    /// use freight_quote::models::Money;
    /// assert_eq!(Money::from_major(150).to_string(), "150.00");
    /// ```
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create Money from minor units (hundredths)
    ///
    /// # Examples
    /// ```
    /// use freight_quote::models::Money;
    /// assert_eq!(Money::from_minor(1050).to_string(), "10.50");
    /// ```
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "1500", "1,500.50", "-20.5" and a leading currency symbol such
    /// as "$10" or "₦1,000".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        // Drop any leading symbol characters
        let rest = rest.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.');
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let amount = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -amount } else { amount }))
    }

    /// Format with thousands grouping and a fixed number of decimal places
    ///
    /// Rounds half away from zero, so `1234.565` at two places is `1,234.57`.
    pub fn format_grouped(&self, places: u32, separator: &str) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(places);

        let digits = rounded.abs().to_string();
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
            None => (digits, None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 * separator.len());
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push_str(separator);
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        match fraction {
            Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
            None => format!("{}{}", sign, grouped),
        }
    }

    /// Format with a currency symbol, e.g. `₦1,500.00` or `-$20.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let body = self.abs().format_grouped(2, ",");
        if self.is_negative() {
            format!("-{}{}", symbol, body)
        } else {
            format!("{}{}", symbol, body)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_grouped(2, ","))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Scale an amount by a quantity (`rate × unit`)
impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, quantity: Decimal) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
