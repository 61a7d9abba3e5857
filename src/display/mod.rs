//! Display formatting for terminal output
//!
//! Currency symbols, amount and totals formatting, and small text layout
//! helpers shared by the reports.

pub mod currency;
pub mod text;

pub use currency::{CurrencySymbols, SymbolTable, TotalsFormatter};
