//! Quote preview
//!
//! A read-only breakdown of one quote: each section with its resolved
//! currency, line rows, a sub-total per section and the per-currency totals
//! of the whole quote, followed by the terms and conditions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::totals::{aggregate_quote, CurrencyTotals};
use crate::display::{text, CurrencySymbols, TotalsFormatter};
use crate::models::{Money, Quote, QuoteId};

/// One line item row of a preview section
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub basis: String,
    /// Unit label, or the raw code for unknown units
    pub unit_of_measurement: String,
    pub unit: Decimal,
    pub rate: Money,
    pub amount: Money,
}

/// One section of a preview
#[derive(Debug, Clone, Serialize)]
pub struct PreviewSection {
    pub name: String,
    /// Resolved currency code ("" when the section has none)
    pub currency: String,
    pub rows: Vec<PreviewRow>,
    pub subtotal: Money,
}

/// Printable breakdown of a quote
#[derive(Debug, Clone, Serialize)]
pub struct QuotePreview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,
    pub title: String,
    pub quote_date: DateTime<Utc>,
    pub sections: Vec<PreviewSection>,
    pub totals: CurrencyTotals,
    pub terms: Vec<String>,
}

impl QuotePreview {
    /// Build the preview of a quote
    pub fn generate(quote: &Quote, terms: &[String]) -> Self {
        let sections = quote
            .sections
            .iter()
            .map(|section| PreviewSection {
                name: section.section_name.clone(),
                currency: section.currency_code().to_string(),
                rows: section
                    .section_data
                    .iter()
                    .map(|item| PreviewRow {
                        basis: item.basis.clone(),
                        unit_of_measurement: item.unit_of_measurement.label().to_string(),
                        unit: item.unit,
                        rate: item.rate,
                        amount: item.amount,
                    })
                    .collect(),
                subtotal: section.subtotal(),
            })
            .collect();

        Self {
            id: quote.id.clone(),
            title: quote.quote_title.clone(),
            quote_date: quote.quote_date,
            sections,
            totals: aggregate_quote(quote),
            terms: terms.to_vec(),
        }
    }

    /// Suggested file stem for exports: "<title> - <date>"
    pub fn file_stem(&self) -> String {
        let stem = format!("{} - {}", self.title, self.quote_date.format("%Y-%m-%d"));
        stem.chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
            .collect()
    }

    /// Format the preview for terminal display
    pub fn format_terminal<S: CurrencySymbols + ?Sized>(
        &self,
        fmt: &TotalsFormatter<'_, S>,
        date_format: &str,
    ) -> String {
        let mut output = String::new();

        let id = self
            .id
            .as_ref()
            .map(|id| format!(" #{}", id))
            .unwrap_or_default();
        output.push_str(&format!("Preview{}\n", id));
        output.push_str(&text::heavy_rule(80));
        output.push('\n');
        output.push_str(&format!("{}\n", self.title));
        output.push_str(&format!("Date: {}\n", self.quote_date.format(date_format)));

        for (idx, section) in self.sections.iter().enumerate() {
            if idx == 0 {
                output.push_str("\nQuote Breakdown\n");
            }
            output.push_str(&format!("\n{}\n", section.name));
            output.push_str(&text::rule(80));
            output.push('\n');
            output.push_str(&format!(
                "{:<24} {:<16} {:>8} {:>14} {:>14}\n",
                "Basis",
                "Unit of measure",
                "Unit",
                format!("Rate ({})", section.currency),
                format!("Amount ({})", section.currency)
            ));

            for row in &section.rows {
                output.push_str(&format!(
                    "{:<24} {:<16} {:>8} {:>14} {:>14}\n",
                    text::truncate(&row.basis, 24),
                    text::truncate(&row.unit_of_measurement, 16),
                    row.unit.normalize().to_string(),
                    fmt.section_money(&section.currency, row.rate),
                    fmt.section_money(&section.currency, row.amount)
                ));
            }

            if !section.rows.is_empty() {
                output.push_str(&format!(
                    "{:>65} {:>14}\n",
                    "Sub Total:",
                    fmt.section_money(&section.currency, section.subtotal)
                ));
            }
        }

        output.push_str(&text::rule(80));
        output.push('\n');
        output.push_str(&format!("Total: {}\n", fmt.totals(&self.totals)));

        if !self.terms.is_empty() {
            output.push_str("\nTerms and Conditions\n");
            for (idx, term) in self.terms.iter().enumerate() {
                output.push_str(&format!("{:>3}. {}\n", idx + 1, term));
            }
        }

        output
    }
}
