//! Reports built on per-currency quote totals
//!
//! [`aggregate`] is the shared engine; the calendar, day listing and
//! preview are views over it with different quote selections.

pub mod calendar;
pub mod day_listing;
pub mod filters;
pub mod preview;
pub mod totals;

pub use calendar::{CalendarDay, CalendarMonth, DaySummary};
pub use day_listing::{DayEntry, DayListing};
pub use preview::{PreviewRow, PreviewSection, QuotePreview};
pub use totals::{aggregate, aggregate_quote, CurrencyTotals};
