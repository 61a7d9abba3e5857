//! Quote and section models
//!
//! A quote is a dated, titled collection of sections. Each section is priced
//! in its own currency and holds the line items charged in that currency.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::currency::CurrencySpec;
use super::ids::QuoteId;
use super::line_item::LineItem;
use super::money::Money;

/// A named, independently priced group of line items
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub section_name: String,

    #[serde(default)]
    pub section_currency: CurrencySpec,

    #[serde(default)]
    pub section_data: Vec<LineItem>,
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>, currency: impl Into<CurrencySpec>) -> Self {
        Self {
            section_name: name.into(),
            section_currency: currency.into(),
            section_data: Vec::new(),
        }
    }

    /// Builder: append a line item
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.section_data.push(item);
        self
    }

    /// The resolved currency code of this section ("" when unknown)
    pub fn currency_code(&self) -> &str {
        self.section_currency.resolve()
    }

    /// Sum of the section's line-item amounts
    pub fn subtotal(&self) -> Money {
        self.section_data.iter().map(|item| item.amount).sum()
    }

    /// Check if the section has no line items
    pub fn is_empty(&self) -> bool {
        self.section_data.is_empty()
    }
}

/// A freight price quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier; absent until the quote has been persisted
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,

    #[serde(default)]
    pub quote_title: String,

    #[serde(deserialize_with = "deserialize_quote_date")]
    pub quote_date: DateTime<Utc>,

    /// Start of the quote's time slot, as entered (e.g. "09 : 00 AM")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// End of the quote's time slot, as entered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Quote {
    /// Create a new, not yet persisted quote
    pub fn new(title: impl Into<String>, quote_date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            quote_title: title.into(),
            quote_date,
            start_time: None,
            end_time: None,
            sections: Vec::new(),
        }
    }

    /// Builder: set the identifier
    pub fn with_id(mut self, id: impl Into<QuoteId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Whether the data layer has issued an id for this quote
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// The calendar day of the quote (UTC)
    pub fn day(&self) -> NaiveDate {
        self.quote_date.date_naive()
    }

    /// Number of line items across all sections
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.section_data.len()).sum()
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC)
/// and bare `YYYY-MM-DD` dates (midnight UTC).
fn deserialize_quote_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_quote_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid quote_date '{}'", raw))
    })
}

/// Parse a quote date in any of the accepted formats
pub fn parse_quote_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StructuredCurrency;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_section_subtotal() {
        let section = Section::new("Origin Charges", "NGN")
            .with_item(LineItem::with_amount("Pickup", Money::from_major(20)))
            .with_item(LineItem::with_amount("Handling", Money::from_minor(1050)));
        assert_eq!(section.subtotal(), Money::from_minor(3050));
        assert_eq!(section.currency_code(), "NGN");
    }

    #[test]
    fn test_structured_section_currency_code() {
        let section = Section::new("Freight", StructuredCurrency::new("USD"));
        assert_eq!(section.currency_code(), "USD");
        assert!(section.is_empty());
    }

    #[test]
    fn test_new_quote_is_not_persisted() {
        let quote = Quote::new("Air Freight", date(2024, 3, 23));
        assert!(!quote.is_persisted());
        assert!(quote.with_id("65f1").is_persisted());
    }

    #[test]
    fn test_deserialize_quote() {
        let json = r#"{
            "_id": "65f1c0a2",
            "quote_title": "Lagos to Johannesburg",
            "quote_date": "2024-03-23T09:00:00.000Z",
            "sections": [
                {"section_name": "Freight", "section_currency": "USD",
                 "section_data": [{"basis": "Airfreight", "unit_of_measurement": "per_kg", "unit": 10, "rate": 4, "amount": 40}]},
                {"section_name": "Local", "section_currency": {"currency": "NGN", "exchange_rate": 1500},
                 "section_data": []}
            ]
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.id, Some(QuoteId::new("65f1c0a2")));
        assert_eq!(quote.day(), NaiveDate::from_ymd_opt(2024, 3, 23).unwrap());
        assert_eq!(quote.quote_date.hour(), 9);
        assert_eq!(quote.sections[1].currency_code(), "NGN");
        assert_eq!(quote.item_count(), 1);
    }

    #[test]
    fn test_parse_quote_date_formats() {
        assert!(parse_quote_date("2024-03-23T09:00:00+01:00").is_some());
        assert!(parse_quote_date("2024-03-23T09:00:00").is_some());
        assert_eq!(
            parse_quote_date("2024-03-23").map(|d| d.date_naive()),
            NaiveDate::from_ymd_opt(2024, 3, 23)
        );
        assert!(parse_quote_date("next tuesday").is_none());
    }
}
