//! Calendar month view
//!
//! A month grid of whole weeks starting on Sunday. Days of the shown month
//! carry a [`DaySummary`]; leading and trailing days from the adjacent
//! months are present for layout only.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::filters;
use super::totals::{aggregate, CurrencyTotals};
use crate::display::{text, CurrencySymbols, TotalsFormatter};
use crate::error::{QuoteError, QuoteResult};
use crate::models::Quote;

/// Width of the weekday grid in terminal output
const GRID_WIDTH: usize = 33;

/// Count and totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub totals: CurrencyTotals,
}

impl DaySummary {
    /// Summarize the quotes dated on `date`
    pub fn generate(quotes: &[Quote], date: NaiveDate) -> Self {
        Self {
            date,
            totals: aggregate(quotes, filters::on_day(date)),
        }
    }

    /// Check if no quote falls on this day
    pub fn is_empty(&self) -> bool {
        self.totals.count == 0
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    /// Present only for days of the shown month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DaySummary>,
}

/// A month of quote activity
#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Rows of seven days, Sunday first
    pub weeks: Vec<Vec<CalendarDay>>,
    /// Totals across the whole month
    pub totals: CurrencyTotals,
}

impl CalendarMonth {
    /// Build the grid for `year`/`month`
    pub fn generate(quotes: &[Quote], year: i32, month: u32) -> QuoteResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            QuoteError::Validation(format!("Invalid month: {}-{:02}", year, month))
        })?;
        let last = last_day_of_month(first);

        let grid_start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
        let grid_end = last + Duration::days(i64::from(6 - last.weekday().num_days_from_sunday()));

        let mut weeks = Vec::new();
        let mut week = Vec::with_capacity(7);
        let mut day = grid_start;
        while day <= grid_end {
            let in_month = day.month() == month && day.year() == year;
            week.push(CalendarDay {
                date: day,
                in_month,
                summary: in_month.then(|| DaySummary::generate(quotes, day)),
            });
            if week.len() == 7 {
                weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
            }
            day += Duration::days(1);
        }

        Ok(Self {
            year,
            month,
            weeks,
            totals: aggregate(quotes, filters::in_month(year, month)),
        })
    }

    /// The first day of the shown month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Summaries of in-month days, in date order
    pub fn days(&self) -> impl Iterator<Item = &DaySummary> {
        self.weeks
            .iter()
            .flatten()
            .filter_map(|cell| cell.summary.as_ref())
    }

    /// Summary for a particular in-month date
    pub fn day(&self, date: NaiveDate) -> Option<&DaySummary> {
        self.days().find(|s| s.date == date)
    }

    /// Format the month for terminal display: one line per day with quotes
    pub fn format_terminal<S: CurrencySymbols + ?Sized>(&self, fmt: &TotalsFormatter<'_, S>) -> String {
        let mut output = String::new();

        let title = self
            .first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default();
        output.push_str(&format!("{}\n", text::centered(&title, GRID_WIDTH)));
        output.push_str(&text::heavy_rule(60));
        output.push('\n');

        output.push_str(&format!("{:>4} ", ""));
        for name in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
            output.push_str(&format!("{:>4}", name));
        }
        output.push('\n');

        for week in &self.weeks {
            output.push_str(&format!("{:>4} ", ""));
            for cell in week {
                let mark = match &cell.summary {
                    Some(s) if !s.is_empty() => format!("{}*", cell.date.day()),
                    Some(_) => cell.date.day().to_string(),
                    None => String::new(),
                };
                output.push_str(&format!("{:>4}", mark));
            }
            output.push('\n');
        }

        output.push_str(&text::rule(60));
        output.push('\n');

        for summary in self.days().filter(|s| !s.is_empty()) {
            output.push_str(&format!(
                "{:<12} {:<10} Total: {}\n",
                summary.date.format("%a %-d"),
                fmt.count(&summary.totals),
                fmt.totals(&summary.totals)
            ));
        }

        output.push_str(&text::rule(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<23} Total: {}\n",
            fmt.count(&self.totals),
            fmt.totals(&self.totals)
        ));

        output
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}
