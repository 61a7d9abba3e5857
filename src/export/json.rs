//! JSON export of reports
//!
//! Reports are wrapped in an envelope recording the export format version,
//! when it was produced and which kind of report it holds.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{QuoteError, QuoteResult};

/// Current export format version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope around an exported report
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a, T: Serialize> {
    /// Format version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    /// Report kind, e.g. "totals", "day", "calendar" or "preview"
    pub kind: &'a str,

    pub report: &'a T,
}

impl<'a, T: Serialize> ReportExport<'a, T> {
    pub fn new(kind: &'a str, report: &'a T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            kind,
            report,
        }
    }
}

/// Write a report wrapped in an export envelope
pub fn export_report_json<W: Write, T: Serialize>(
    kind: &str,
    report: &T,
    writer: &mut W,
    pretty: bool,
) -> QuoteResult<()> {
    let export = ReportExport::new(kind, report);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| QuoteError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Money, Quote, Section};
    use crate::reports::aggregate_quote;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn test_export_totals() {
        let quote = Quote::new("Q", Utc.with_ymd_and_hms(2024, 3, 23, 9, 0, 0).unwrap())
            .with_section(Section::new("S", "USD").with_item(LineItem::with_amount("x", Money::from_major(150))));
        let totals = aggregate_quote(&quote);

        let mut buffer = Vec::new();
        export_report_json("totals", &totals, &mut buffer, true).unwrap();

        let value: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["kind"], "totals");
        assert_eq!(value["report"]["count"], 1);
        assert_eq!(value["report"]["amounts"]["USD"].as_f64(), Some(150.0));
    }
}
