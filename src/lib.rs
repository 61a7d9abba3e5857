//! freight-quote - multi-currency freight quote validation and totals
//!
//! This library provides the core of the freight quote tool: resolving a
//! section's currency, aggregating quote amounts per currency, validating
//! form data against a schema tree, and rendering the calendar, day and
//! preview reports built on those totals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Quotes, sections, currencies and line items
//! - `validation`: Schema trees, rules, error trees and results
//! - `reports`: Per-currency totals and the views built on them
//! - `display`: Currency symbols and terminal formatting
//! - `export`: CSV, JSON and YAML report export
//! - `storage`: Quote, schema and settings files
//!
//! # Example
//!
//! ```rust
//! use freight_quote::models::{LineItem, Money, Quote, Section, StructuredCurrency};
//! use freight_quote::reports::{aggregate, filters};
//! use chrono::{TimeZone, Utc};
//!
//! let date = Utc.with_ymd_and_hms(2024, 3, 23, 9, 0, 0).unwrap();
//! let quote = Quote::new("Lagos run", date).with_section(
//!     Section::new("Haulage", StructuredCurrency::new("USD").with_customer_currency("NGN"))
//!         .with_item(LineItem::with_amount("Trucking", Money::from_major(150))),
//! );
//!
//! let totals = aggregate(&[quote], filters::all());
//! assert_eq!(totals.count, 1);
//! assert_eq!(totals.get("USD"), Some(Money::from_major(150)));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;
pub mod validation;

pub use error::{QuoteError, QuoteResult};
pub use models::{resolve_currency, CurrencySpec};
pub use reports::{aggregate, CurrencyTotals};
pub use validation::{transform, validate, ValidationResult};
