//! Core data models for freight-quote
//!
//! This module contains the structures that describe a quote: its sections,
//! each section's currency, and the priced line items inside them.

pub mod currency;
pub mod ids;
pub mod line_item;
pub mod money;
pub mod quote;
pub mod unit;

pub use currency::{resolve_currency, CurrencySpec, CurrencyValidationError, StructuredCurrency};
pub use ids::{LineItemId, QuoteId};
pub use line_item::{LineItem, LineItemValidationError};
pub use money::{Money, MoneyParseError};
pub use quote::{parse_quote_date, Quote, Section};
pub use unit::UnitOfMeasurement;
