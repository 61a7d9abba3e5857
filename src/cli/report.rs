//! CLI commands for quote reports
//!
//! Totals, the calendar month, the day listing and the quote preview, all
//! computed from a quotes file exported by the data layer.

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use super::export::{announce, open_output, write_structured, ExportFormat};
use crate::config::Settings;
use crate::display::{SymbolTable, TotalsFormatter};
use crate::error::{QuoteError, QuoteResult};
use crate::export::{export_preview_csv, export_totals_csv};
use crate::models::QuoteId;
use crate::reports::{aggregate, filters, CalendarMonth, DayListing, QuotePreview};
use crate::storage::{find_quote, load_quotes};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Quote count and per-currency totals
    Totals {
        /// Quotes file (JSON or YAML)
        quotes: PathBuf,

        /// Only quotes dated on this day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "id"])]
        day: Option<String>,

        /// Only quotes dated in this month (YYYY-MM)
        #[arg(short, long, conflicts_with = "id")]
        month: Option<String>,

        /// Only the quote with this id
        #[arg(long)]
        id: Option<String>,

        /// Export format instead of terminal output
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Export destination (stdout when omitted)
        #[arg(short, long, requires = "format")]
        output: Option<PathBuf>,
    },

    /// Month calendar with per-day counts and totals
    Calendar {
        /// Quotes file (JSON or YAML)
        quotes: PathBuf,

        /// Month to show (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Export format instead of terminal output
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Export destination (stdout when omitted)
        #[arg(short, long, requires = "format")]
        output: Option<PathBuf>,
    },

    /// Quotes of a single day with their totals
    Day {
        /// Quotes file (JSON or YAML)
        quotes: PathBuf,

        /// Day to list (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Export format instead of terminal output
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Export destination (stdout when omitted)
        #[arg(short, long, requires = "format")]
        output: Option<PathBuf>,
    },

    /// Section-by-section breakdown of one quote
    Preview {
        /// Quotes file (JSON or YAML)
        quotes: PathBuf,

        /// Quote id
        #[arg(long)]
        id: String,

        /// Export format instead of terminal output
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Export destination: a file, or a directory to write
        /// "<title> - <date>.<ext>" into (stdout when omitted)
        #[arg(short, long, requires = "format")]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(settings: &Settings, cmd: ReportCommands) -> QuoteResult<()> {
    match cmd {
        ReportCommands::Totals {
            quotes,
            day,
            month,
            id,
            format,
            output,
        } => handle_totals(settings, quotes, day, month, id, format, output),
        ReportCommands::Calendar {
            quotes,
            month,
            format,
            output,
        } => handle_calendar(settings, quotes, month, format, output),
        ReportCommands::Day {
            quotes,
            date,
            format,
            output,
        } => handle_day(settings, quotes, date, format, output),
        ReportCommands::Preview {
            quotes,
            id,
            format,
            output,
        } => handle_preview(settings, quotes, id, format, output),
    }
}

fn handle_totals(
    settings: &Settings,
    quotes: PathBuf,
    day: Option<String>,
    month: Option<String>,
    id: Option<String>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> QuoteResult<()> {
    let quotes = load_quotes(&quotes)?;

    let totals = match (day, month, id) {
        (Some(day), _, _) => aggregate(&quotes, filters::on_day(parse_date(&day)?)),
        (_, Some(month), _) => {
            let (year, month) = parse_month(&month)?;
            aggregate(&quotes, filters::in_month(year, month))
        }
        (_, _, Some(id)) => {
            find_quote(&quotes, &id)?;
            aggregate(&quotes, filters::with_id(QuoteId::new(id)))
        }
        _ => aggregate(&quotes, filters::all()),
    };

    match format {
        Some(ExportFormat::Csv) => {
            let mut writer = open_output(output.as_deref())?;
            export_totals_csv(&totals, &mut writer)?;
            writer.flush()?;
            announce("totals", output.as_ref());
        }
        Some(format) => write_structured("totals", &totals, format, output.as_ref())?,
        None => {
            let table = SymbolTable::from_settings(settings);
            let fmt = TotalsFormatter::new(&table, settings);
            println!("{}", fmt.count(&totals));
            println!("Total: {}", fmt.totals(&totals));
        }
    }

    Ok(())
}

fn handle_calendar(
    settings: &Settings,
    quotes: PathBuf,
    month: Option<String>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> QuoteResult<()> {
    let quotes = load_quotes(&quotes)?;

    let (year, month) = match month {
        Some(m) => parse_month(&m)?,
        None => {
            let today = chrono::Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let calendar = CalendarMonth::generate(&quotes, year, month)?;

    match format {
        Some(format) => write_structured("calendar", &calendar, format, output.as_ref())?,
        None => {
            let table = SymbolTable::from_settings(settings);
            print!("{}", calendar.format_terminal(&TotalsFormatter::new(&table, settings)));
        }
    }

    Ok(())
}

fn handle_day(
    settings: &Settings,
    quotes: PathBuf,
    date: Option<String>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> QuoteResult<()> {
    let quotes = load_quotes(&quotes)?;

    let date = match date {
        Some(d) => parse_date(&d)?,
        None => chrono::Local::now().date_naive(),
    };

    let listing = DayListing::generate(&quotes, date);

    match format {
        Some(format) => write_structured("day", &listing, format, output.as_ref())?,
        None => {
            let table = SymbolTable::from_settings(settings);
            print!(
                "{}",
                listing.format_terminal(&TotalsFormatter::new(&table, settings), &settings.date_format)
            );
        }
    }

    Ok(())
}

fn handle_preview(
    settings: &Settings,
    quotes: PathBuf,
    id: String,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> QuoteResult<()> {
    let quotes = load_quotes(&quotes)?;
    let quote = find_quote(&quotes, &id)?;
    let preview = QuotePreview::generate(quote, &settings.terms);

    let output = match (output, format) {
        (Some(dir), Some(format)) if dir.is_dir() => {
            Some(dir.join(format!("{}.{}", preview.file_stem(), format.extension())))
        }
        (output, _) => output,
    };

    match format {
        Some(ExportFormat::Csv) => {
            let mut writer = open_output(output.as_deref())?;
            export_preview_csv(&preview, &mut writer)?;
            writer.flush()?;
            announce("preview", output.as_ref());
        }
        Some(format) => write_structured("preview", &preview, format, output.as_ref())?,
        None => {
            let table = SymbolTable::from_settings(settings);
            print!(
                "{}",
                preview.format_terminal(&TotalsFormatter::new(&table, settings), &settings.date_format)
            );
        }
    }

    Ok(())
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> QuoteResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        QuoteError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse a YYYY-MM month argument
pub fn parse_month(s: &str) -> QuoteResult<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| {
            QuoteError::Validation(format!(
                "Invalid month format: '{}'. Use YYYY-MM (e.g., 2024-03)",
                s
            ))
        })
}
