//! Line item model
//!
//! A single priced row of a section: what is charged (`basis`), how it is
//! measured, how many units, the rate per unit and the resulting amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LineItemId;
use super::money::Money;
use super::unit::UnitOfMeasurement;

/// A priced row inside a section
///
/// `amount` is authoritative. Form controllers usually derive it from
/// `unit × rate`, but totals always use the stored value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifier issued by the data layer, if any
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<LineItemId>,

    /// What is being charged, e.g. "Airfreight" or "Documentation"
    #[serde(default)]
    pub basis: String,

    /// Measurement code for `unit`
    #[serde(default)]
    pub unit_of_measurement: UnitOfMeasurement,

    /// Quantity of units
    #[serde(default)]
    pub unit: Decimal,

    /// Price per unit
    #[serde(default)]
    pub rate: Money,

    /// Charged amount
    #[serde(default)]
    pub amount: Money,
}

impl LineItem {
    /// Create a line item whose amount is `unit × rate`
    pub fn new(
        basis: impl Into<String>,
        unit_of_measurement: UnitOfMeasurement,
        unit: Decimal,
        rate: Money,
    ) -> Self {
        Self {
            id: None,
            basis: basis.into(),
            unit_of_measurement,
            unit,
            rate,
            amount: rate * unit,
        }
    }

    /// Create a line item carrying only an amount
    pub fn with_amount(basis: impl Into<String>, amount: Money) -> Self {
        Self {
            basis: basis.into(),
            unit: Decimal::ONE,
            rate: amount,
            amount,
            ..Self::default()
        }
    }

    /// The amount implied by `unit × rate`
    pub fn computed_amount(&self) -> Money {
        self.rate * self.unit
    }

    /// Whether the stored amount agrees with `unit × rate`
    pub fn amount_matches_rate(&self) -> bool {
        self.computed_amount() == self.amount
    }

    /// Recompute and store the amount from `unit × rate`
    pub fn recalculate(&mut self) {
        self.amount = self.computed_amount();
    }

    /// Validate the line item
    pub fn validate(&self) -> Result<(), LineItemValidationError> {
        if self.basis.trim().is_empty() {
            return Err(LineItemValidationError::EmptyBasis);
        }

        if self.unit < Decimal::ZERO {
            return Err(LineItemValidationError::NegativeUnit(self.unit));
        }

        if self.rate.is_negative() {
            return Err(LineItemValidationError::NegativeRate(self.rate));
        }

        Ok(())
    }
}

/// Validation errors for line items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemValidationError {
    EmptyBasis,
    NegativeUnit(Decimal),
    NegativeRate(Money),
}

impl fmt::Display for LineItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBasis => write!(f, "Line item basis cannot be empty"),
            Self::NegativeUnit(unit) => write!(f, "Unit cannot be negative: {}", unit),
            Self::NegativeRate(rate) => write!(f, "Rate cannot be negative: {}", rate),
        }
    }
}

impl std::error::Error for LineItemValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_amount() {
        let item = LineItem::new(
            "Airfreight",
            UnitOfMeasurement::PerKg,
            Decimal::new(5534, 2),
            Money::from_major(4),
        );
        assert_eq!(item.amount, Money::from_minor(22136));
        assert!(item.amount_matches_rate());
    }

    #[test]
    fn test_stored_amount_is_not_recomputed() {
        let json = r#"{"basis":"Handling","unit_of_measurement":"per_shipment","unit":2,"rate":10,"amount":25}"#;
        let mut item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.amount, Money::from_major(25));
        assert!(!item.amount_matches_rate());

        item.recalculate();
        assert_eq!(item.amount, Money::from_major(20));
    }

    #[test]
    fn test_missing_fields_default() {
        let item: LineItem = serde_json::from_str(r#"{"amount": 30}"#).unwrap();
        assert_eq!(item.amount, Money::from_major(30));
        assert!(item.basis.is_empty());
        assert_eq!(item.unit, Decimal::ZERO);
    }

    #[test]
    fn test_accepts_backend_id_key() {
        let item: LineItem = serde_json::from_str(r#"{"_id": "abc123", "amount": 1}"#).unwrap();
        assert_eq!(item.id, Some(LineItemId::new("abc123")));
    }

    #[test]
    fn test_validation() {
        let mut item = LineItem::with_amount("Customs", Money::from_major(10));
        assert!(item.validate().is_ok());

        item.basis = "  ".into();
        assert_eq!(item.validate(), Err(LineItemValidationError::EmptyBasis));

        item.basis = "Customs".into();
        item.unit = Decimal::from(-1);
        assert!(matches!(
            item.validate(),
            Err(LineItemValidationError::NegativeUnit(_))
        ));
    }
}
