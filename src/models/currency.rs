//! Section currency representation and resolution
//!
//! A section's currency arrives in one of two shapes: a bare code such as
//! `"USD"`, or a record carrying the code together with the customer's
//! currency, an exchange rate and a base-currency flag. Both shapes are kept
//! exactly as received and both resolve to a single currency code.

use rust_decimal::prelude::*;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The polymorphic currency of a section
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencySpec {
    /// A bare currency code, already canonical
    PlainCode(String),
    /// A structured record with rate and base metadata
    Structured(StructuredCurrency),
}

/// Structured currency record
///
/// Every field is optional on input; fields that are present but of the wrong
/// type are kept verbatim in `extra` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredCurrency {
    pub currency: Option<String>,
    pub customer_currency: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub is_base_currency: Option<bool>,
    /// Unknown or mistyped keys, preserved as received
    pub extra: Map<String, Value>,
}

const CURRENCY_KEY: &str = "currency";
const CUSTOMER_CURRENCY_KEY: &str = "customer_currency";
const EXCHANGE_RATE_KEY: &str = "exchange_rate";
const IS_BASE_KEY: &str = "is_base_currency";

impl StructuredCurrency {
    /// Create a record with only the currency code set
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: Some(currency.into()),
            ..Self::default()
        }
    }

    /// Builder: set the customer's currency
    pub fn with_customer_currency(mut self, code: impl Into<String>) -> Self {
        self.customer_currency = Some(code.into());
        self
    }

    /// Builder: set the exchange rate
    pub fn with_exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Builder: mark whether this is the base currency
    pub fn with_base(mut self, is_base: bool) -> Self {
        self.is_base_currency = Some(is_base);
        self
    }

    /// Whether this is the currency the customer pays in
    pub fn is_base(&self) -> bool {
        self.is_base_currency.unwrap_or(false)
    }

    /// Check that the record is complete enough to price a section
    pub fn validate(&self) -> Result<(), CurrencyValidationError> {
        if self.currency.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(CurrencyValidationError::MissingCurrency);
        }

        if self
            .customer_currency
            .as_deref()
            .map_or(true, |c| c.trim().is_empty())
        {
            return Err(CurrencyValidationError::MissingCustomerCurrency);
        }

        match self.exchange_rate {
            None => Err(CurrencyValidationError::MissingExchangeRate),
            Some(rate) if rate <= Decimal::ZERO => {
                Err(CurrencyValidationError::NonPositiveExchangeRate(rate))
            }
            Some(_) => Ok(()),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let mut record = Self::default();

        for (key, value) in map {
            match key.as_str() {
                CURRENCY_KEY | CUSTOMER_CURRENCY_KEY => match value {
                    Value::String(code) if key == CURRENCY_KEY => record.currency = Some(code),
                    Value::String(code) => record.customer_currency = Some(code),
                    other => {
                        record.extra.insert(key, other);
                    }
                },
                EXCHANGE_RATE_KEY => match parse_rate(&value) {
                    Some(rate) => record.exchange_rate = Some(rate),
                    None => {
                        record.extra.insert(key, value);
                    }
                },
                IS_BASE_KEY => match value {
                    Value::Bool(flag) => record.is_base_currency = Some(flag),
                    other => {
                        record.extra.insert(key, other);
                    }
                },
                _ => {
                    record.extra.insert(key, value);
                }
            }
        }

        record
    }
}

fn parse_rate(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

impl CurrencySpec {
    /// Shorthand for a bare code
    pub fn code(code: impl Into<String>) -> Self {
        Self::PlainCode(code.into())
    }

    /// Resolve to the canonical currency code
    ///
    /// Total over both shapes. A record without a usable `currency` resolves
    /// to the empty string, which callers treat as the "unknown currency"
    /// bucket rather than an error.
    pub fn resolve(&self) -> &str {
        match self {
            Self::PlainCode(code) => code,
            Self::Structured(record) => record.currency.as_deref().unwrap_or(""),
        }
    }

    /// The structured record, if this spec carries one
    pub fn as_structured(&self) -> Option<&StructuredCurrency> {
        match self {
            Self::PlainCode(_) => None,
            Self::Structured(record) => Some(record),
        }
    }

    /// Build a spec from an arbitrary JSON value
    ///
    /// Strings become bare codes, objects become records. Anything else
    /// (null, numbers, arrays) is treated as an unset bare code.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(code) => Self::PlainCode(code),
            Value::Object(map) => Self::Structured(StructuredCurrency::from_map(map)),
            _ => Self::PlainCode(String::new()),
        }
    }
}

/// Resolve a section currency to its code
pub fn resolve_currency(spec: &CurrencySpec) -> &str {
    spec.resolve()
}

impl Default for CurrencySpec {
    fn default() -> Self {
        Self::PlainCode(String::new())
    }
}

impl fmt::Display for CurrencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve())
    }
}

impl From<&str> for CurrencySpec {
    fn from(code: &str) -> Self {
        Self::PlainCode(code.to_string())
    }
}

impl From<StructuredCurrency> for CurrencySpec {
    fn from(record: StructuredCurrency) -> Self {
        Self::Structured(record)
    }
}

impl<'de> Deserialize<'de> for CurrencySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

impl Serialize for CurrencySpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::PlainCode(code) => serializer.serialize_str(code),
            Self::Structured(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for StructuredCurrency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(code) = &self.currency {
            map.serialize_entry(CURRENCY_KEY, code)?;
        }
        if let Some(code) = &self.customer_currency {
            map.serialize_entry(CUSTOMER_CURRENCY_KEY, code)?;
        }
        if let Some(rate) = &self.exchange_rate {
            map.serialize_entry(EXCHANGE_RATE_KEY, rate)?;
        }
        if let Some(flag) = &self.is_base_currency {
            map.serialize_entry(IS_BASE_KEY, flag)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Validation errors for a structured currency record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyValidationError {
    MissingCurrency,
    MissingCustomerCurrency,
    MissingExchangeRate,
    NonPositiveExchangeRate(Decimal),
}

impl fmt::Display for CurrencyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCurrency => write!(f, "Section currency is required"),
            Self::MissingCustomerCurrency => write!(f, "Customer currency is required"),
            Self::MissingExchangeRate => write!(f, "Exchange rate is required"),
            Self::NonPositiveExchangeRate(rate) => {
                write!(f, "Exchange rate must be positive, got {}", rate)
            }
        }
    }
}

impl std::error::Error for CurrencyValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_code_resolves_unchanged() {
        for code in ["USD", "NGN", "", "not-a-code"] {
            assert_eq!(CurrencySpec::code(code).resolve(), code);
        }
    }

    #[test]
    fn test_structured_resolves_currency_field() {
        let spec: CurrencySpec = StructuredCurrency::new("EUR")
            .with_customer_currency("NGN")
            .with_exchange_rate(Decimal::from(1650))
            .into();
        assert_eq!(resolve_currency(&spec), "EUR");
    }

    #[test]
    fn test_structured_without_currency_resolves_empty() {
        let spec = CurrencySpec::from_value(json!({ "customer_currency": "USD" }));
        assert_eq!(spec.resolve(), "");

        let mistyped = CurrencySpec::from_value(json!({ "currency": 42 }));
        assert_eq!(mistyped.resolve(), "");
    }

    #[test]
    fn test_unexpected_shapes_resolve_empty() {
        for value in [json!(null), json!(12), json!(["USD"]), json!(true)] {
            assert_eq!(CurrencySpec::from_value(value).resolve(), "");
        }
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let plain: CurrencySpec = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(plain, CurrencySpec::code("USD"));

        let record: CurrencySpec = serde_json::from_str(
            r#"{"currency":"USD","customer_currency":"NGN","exchange_rate":1550.5,"is_base_currency":true}"#,
        )
        .unwrap();
        let structured = record.as_structured().unwrap();
        assert_eq!(structured.exchange_rate, Some(Decimal::new(15505, 1)));
        assert!(structured.is_base());
    }

    #[test]
    fn test_representation_is_preserved() {
        let input = json!({
            "currency": "GBP",
            "exchange_rate": "oops",
            "note": "spot rate",
        });
        let spec = CurrencySpec::from_value(input.clone());
        let output = serde_json::to_value(&spec).unwrap();
        assert_eq!(output, input);

        let plain = serde_json::to_value(CurrencySpec::code("NGN")).unwrap();
        assert_eq!(plain, json!("NGN"));
    }

    #[test]
    fn test_exchange_rate_accepts_numeric_strings() {
        let spec = CurrencySpec::from_value(json!({ "currency": "USD", "exchange_rate": "1.25" }));
        assert_eq!(
            spec.as_structured().unwrap().exchange_rate,
            Some(Decimal::new(125, 2))
        );
    }

    #[test]
    fn test_validate_record() {
        let complete = StructuredCurrency::new("USD")
            .with_customer_currency("NGN")
            .with_exchange_rate(Decimal::from(1500));
        assert!(complete.validate().is_ok());

        assert_eq!(
            StructuredCurrency::default().validate(),
            Err(CurrencyValidationError::MissingCurrency)
        );
        assert_eq!(
            StructuredCurrency::new("USD").validate(),
            Err(CurrencyValidationError::MissingCustomerCurrency)
        );
        let zero_rate = StructuredCurrency::new("USD")
            .with_customer_currency("USD")
            .with_exchange_rate(Decimal::ZERO);
        assert_eq!(
            zero_rate.validate(),
            Err(CurrencyValidationError::NonPositiveExchangeRate(Decimal::ZERO))
        );
    }
}
