//! Per-currency quote totals
//!
//! Totals are recomputed from scratch on every call. Currency keys keep the
//! order in which they were first encountered (quote order, then section
//! order); no sorting is applied. Sections whose currency does not resolve
//! accumulate under the empty-string code.

use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;

use crate::models::{Money, Quote};

/// Quote count and per-currency amounts for a selection of quotes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyTotals {
    /// Number of quotes selected (not sections or items)
    pub count: usize,
    /// Summed amounts keyed by resolved currency code, first-encounter order
    pub amounts: Vec<(String, Money)>,
}

impl CurrencyTotals {
    /// Check if no currency was encountered
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// The total for a currency code
    pub fn get(&self, code: &str) -> Option<Money> {
        self.amounts
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, amount)| *amount)
    }

    /// Currency codes in first-encounter order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.amounts.iter().map(|(code, _)| code.as_str())
    }

    /// Sum across all currencies (meaningful only as a conservation check)
    pub fn grand_total(&self) -> Money {
        self.amounts.iter().map(|(_, amount)| amount).sum()
    }

    /// Add an amount under a code, appending the code on first sight
    fn accumulate(&mut self, code: &str, amount: Money) {
        match self.amounts.iter_mut().find(|(c, _)| c == code) {
            Some((_, total)) => *total += amount,
            None => self.amounts.push((code.to_string(), amount)),
        }
    }
}

/// Count the quotes matching `filter` and total their line items by
/// section currency
pub fn aggregate<F>(quotes: &[Quote], filter: F) -> CurrencyTotals
where
    F: Fn(&Quote) -> bool,
{
    let mut totals = CurrencyTotals::default();

    for quote in quotes.iter().filter(|q| filter(q)) {
        totals.count += 1;
        for section in &quote.sections {
            totals.accumulate(section.currency_code(), section.subtotal());
        }
    }

    tracing::debug!(
        count = totals.count,
        currencies = totals.amounts.len(),
        "Aggregated quote totals"
    );

    totals
}

/// Totals for a single quote
pub fn aggregate_quote(quote: &Quote) -> CurrencyTotals {
    aggregate(std::slice::from_ref(quote), |_| true)
}

struct OrderedAmounts<'a>(&'a [(String, Money)]);

impl Serialize for OrderedAmounts<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, amount) in self.0 {
            map.serialize_entry(code, amount)?;
        }
        map.end()
    }
}

/// Serialized as `{"count": n, "amounts": {"USD": 150.0, ...}}` with keys
/// in first-encounter order
impl Serialize for CurrencyTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CurrencyTotals", 2)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("amounts", &OrderedAmounts(&self.amounts))?;
        state.end()
    }
}
