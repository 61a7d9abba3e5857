//! Quotes listed for a single day

use chrono::NaiveDate;
use serde::Serialize;

use super::filters;
use super::totals::{aggregate, aggregate_quote, CurrencyTotals};
use crate::display::{text, CurrencySymbols, TotalsFormatter};
use crate::models::{Quote, QuoteId};

/// One quote in a day listing
#[derive(Debug, Clone, Serialize)]
pub struct DayEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,
    pub title: String,
    /// Quote time of day, "HH:MM AM"
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub totals: CurrencyTotals,
}

/// The quotes of one day with per-quote and overall totals
#[derive(Debug, Clone, Serialize)]
pub struct DayListing {
    pub date: NaiveDate,
    pub entries: Vec<DayEntry>,
    pub totals: CurrencyTotals,
}

impl DayListing {
    /// List the quotes dated on `date`, in collection order
    pub fn generate(quotes: &[Quote], date: NaiveDate) -> Self {
        let on_day = filters::on_day(date);
        let entries = quotes
            .iter()
            .filter(|q| on_day(q))
            .map(|quote| DayEntry {
                id: quote.id.clone(),
                title: quote.quote_title.clone(),
                time: quote.quote_date.format("%I:%M %p").to_string(),
                start_time: quote.start_time.clone(),
                end_time: quote.end_time.clone(),
                totals: aggregate_quote(quote),
            })
            .collect();

        Self {
            date,
            entries,
            totals: aggregate(quotes, on_day),
        }
    }

    /// Check if there are no quotes on this day
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the listing for terminal display
    pub fn format_terminal<S: CurrencySymbols + ?Sized>(
        &self,
        fmt: &TotalsFormatter<'_, S>,
        date_format: &str,
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!("Quotes for {}\n", self.date.format(date_format)));
        output.push_str(&text::heavy_rule(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("There are no quotes to show...\n");
            return output;
        }

        for entry in &self.entries {
            let id = entry
                .id
                .as_ref()
                .map(|id| format!(" #{}", id))
                .unwrap_or_default();
            output.push_str(&format!(
                "{:<40} {:>10}\n",
                text::truncate(&format!("{}{}", entry.title, id), 40),
                entry.time
            ));
            if let (Some(start), Some(end)) = (&entry.start_time, &entry.end_time) {
                output.push_str(&format!("  {} - {}\n", start, end));
            }
            output.push_str(&format!("  {}\n", fmt.totals(&entry.totals)));
        }

        output.push_str(&text::rule(60));
        output.push('\n');
        output.push_str(&format!(
            "{}  Total: {}\n",
            fmt.count(&self.totals),
            fmt.totals(&self.totals)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::display::SymbolTable;
    use crate::models::{LineItem, Money, Section};
    use chrono::{TimeZone, Utc};

    fn quote(title: &str, d: u32, hour: u32, sections: &[(&str, i64)]) -> Quote {
        let mut quote = Quote::new(title, Utc.with_ymd_and_hms(2024, 3, d, hour, 15, 0).unwrap());
        for (code, amount) in sections {
            quote = quote.with_section(
                Section::new("S", *code).with_item(LineItem::with_amount("x", Money::from_major(*amount))),
            );
        }
        quote
    }

    #[test]
    fn test_listing_per_quote_totals() {
        let quotes = vec![
            quote("Air", 23, 9, &[("USD", 10), ("NGN", 5)]),
            quote("Sea", 24, 9, &[("USD", 99)]),
            quote("Road", 23, 14, &[("NGN", 7)]),
        ];
        let listing = DayListing::generate(&quotes, NaiveDate::from_ymd_opt(2024, 3, 23).unwrap());

        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.entries[0].title, "Air");
        assert_eq!(listing.entries[0].time, "09:15 AM");
        assert_eq!(listing.entries[1].time, "02:15 PM");
        assert_eq!(listing.entries[1].totals.get("NGN"), Some(Money::from_major(7)));

        assert_eq!(listing.totals.count, 2);
        assert_eq!(listing.totals.codes().collect::<Vec<_>>(), vec!["USD", "NGN"]);
        assert_eq!(listing.totals.get("NGN"), Some(Money::from_major(12)));
    }

    #[test]
    fn test_empty_day() {
        let listing = DayListing::generate(&[], NaiveDate::from_ymd_opt(2024, 3, 23).unwrap());
        let settings = Settings::default();
        let table = SymbolTable::builtin();
        let out = listing.format_terminal(&TotalsFormatter::new(&table, &settings), &settings.date_format);
        assert!(out.starts_with("Quotes for 23/3/2024"));
        assert!(out.contains("There are no quotes to show"));
    }

    #[test]
    fn test_format_terminal() {
        let quotes = vec![quote("Air", 23, 9, &[("USD", 10), ("NGN", 5)]).with_id("abc")];
        let listing = DayListing::generate(&quotes, NaiveDate::from_ymd_opt(2024, 3, 23).unwrap());
        let settings = Settings::default();
        let table = SymbolTable::builtin();
        let out = listing.format_terminal(&TotalsFormatter::new(&table, &settings), &settings.date_format);
        assert!(out.contains("Air #abc"));
        assert!(out.contains("$10.00, ₦5.00"));
    }
}
