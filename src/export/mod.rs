//! Report export
//!
//! - CSV: quote previews and currency totals (spreadsheet-compatible)
//! - JSON: any report, wrapped in a versioned envelope
//! - YAML: the same envelope in human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_preview_csv, export_totals_csv};
pub use self::json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_report_yaml;
