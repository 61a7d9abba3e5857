//! CSV export
//!
//! Previews export one row per line item plus a sub-total row per section;
//! totals export one row per currency.

use std::io::Write;

use crate::error::{QuoteError, QuoteResult};
use crate::reports::{CurrencyTotals, QuotePreview};

fn export_err(e: csv::Error) -> QuoteError {
    QuoteError::Export(e.to_string())
}

/// Export a quote preview to CSV
pub fn export_preview_csv<W: Write>(preview: &QuotePreview, writer: W) -> QuoteResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "Quote ID",
        "Quote Date",
        "Section",
        "Currency",
        "Basis",
        "Unit of Measure",
        "Unit",
        "Rate",
        "Amount",
    ])
    .map_err(export_err)?;

    let id = preview.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    let date = preview.quote_date.format("%Y-%m-%d").to_string();

    for section in &preview.sections {
        for row in &section.rows {
            let unit = row.unit.normalize().to_string();
            let rate = row.rate.amount().normalize().to_string();
            let amount = row.amount.amount().normalize().to_string();
            csv.write_record([
                id.as_str(),
                date.as_str(),
                section.name.as_str(),
                section.currency.as_str(),
                row.basis.as_str(),
                row.unit_of_measurement.as_str(),
                unit.as_str(),
                rate.as_str(),
                amount.as_str(),
            ])
            .map_err(export_err)?;
        }

        let subtotal = section.subtotal.amount().normalize().to_string();
        csv.write_record([
            id.as_str(),
            date.as_str(),
            section.name.as_str(),
            section.currency.as_str(),
            "Sub Total",
            "",
            "",
            "",
            subtotal.as_str(),
        ])
        .map_err(export_err)?;
    }

    csv.flush()?;
    Ok(())
}

/// Export per-currency totals to CSV, in first-encounter order
pub fn export_totals_csv<W: Write>(totals: &CurrencyTotals, writer: W) -> QuoteResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Currency", "Amount", "Quote Count"])
        .map_err(export_err)?;

    let count = totals.count.to_string();
    for (code, amount) in &totals.amounts {
        let amount = amount.amount().normalize().to_string();
        csv.write_record([code.as_str(), amount.as_str(), count.as_str()])
            .map_err(export_err)?;
    }

    csv.flush()?;
    Ok(())
}
