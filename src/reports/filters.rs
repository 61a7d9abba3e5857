//! Quote selection predicates for aggregation
//!
//! Each function returns a predicate suitable for [`super::aggregate`].

use chrono::{Datelike, NaiveDate};

use crate::models::{Quote, QuoteId};

/// Every quote
pub fn all() -> impl Fn(&Quote) -> bool {
    |_| true
}

/// Quotes dated on `day` (UTC calendar day)
pub fn on_day(day: NaiveDate) -> impl Fn(&Quote) -> bool {
    move |quote| quote.day() == day
}

/// Quotes dated within the given month
pub fn in_month(year: i32, month: u32) -> impl Fn(&Quote) -> bool {
    move |quote| {
        let day = quote.day();
        day.year() == year && day.month() == month
    }
}

/// The quote with the given identifier
pub fn with_id(id: QuoteId) -> impl Fn(&Quote) -> bool {
    move |quote| quote.id.as_ref() == Some(&id)
}

/// The same quote as `target`: matched by id once persisted, otherwise by
/// value
pub fn same_quote(target: &Quote) -> impl Fn(&Quote) -> bool + '_ {
    move |quote| match &target.id {
        Some(id) => quote.id.as_ref() == Some(id),
        None => quote == target,
    }
}
