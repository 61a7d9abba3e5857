//! YAML export of reports

use serde::Serialize;
use std::io::Write;

use super::json::ReportExport;
use crate::error::{QuoteError, QuoteResult};

/// Write a report as YAML, wrapped in the same envelope as JSON exports
pub fn export_report_yaml<W: Write, T: Serialize>(
    kind: &str,
    report: &T,
    writer: &mut W,
) -> QuoteResult<()> {
    let export = ReportExport::new(kind, report);

    writeln!(writer, "# freight-quote {} export", kind)
        .map_err(|e| QuoteError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| QuoteError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| QuoteError::Export(e.to_string()))?;

    Ok(())
}
