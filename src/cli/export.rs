//! Output plumbing shared by the report commands
//!
//! Reports print to the terminal by default; with `--format` they are
//! exported, to `--output` when given and to stdout otherwise.

use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{QuoteError, QuoteResult};
use crate::export::{json, yaml};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (totals and previews)
    Csv,
    /// JSON wrapped in an export envelope
    Json,
    /// YAML wrapped in an export envelope
    Yaml,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Open the export destination
pub fn open_output(output: Option<&Path>) -> QuoteResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                QuoteError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Export a report as JSON or YAML
///
/// CSV is report-specific and handled by the caller.
pub fn write_structured<T: Serialize>(
    kind: &str,
    report: &T,
    format: ExportFormat,
    output: Option<&PathBuf>,
) -> QuoteResult<()> {
    let mut writer = open_output(output.map(PathBuf::as_path))?;

    match format {
        ExportFormat::Json => {
            json::export_report_json(kind, report, &mut writer, true)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => yaml::export_report_yaml(kind, report, &mut writer)?,
        ExportFormat::Csv => {
            return Err(QuoteError::Validation(format!(
                "CSV export is not available for the {} report; use json or yaml",
                kind
            )))
        }
    }

    writer.flush()?;
    announce(kind, output);
    Ok(())
}

/// Tell the user where an export went (silent for stdout)
pub fn announce(kind: &str, output: Option<&PathBuf>) {
    if let Some(path) = output {
        println!("{} report exported to: {}", capitalize(kind), path.display());
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
