//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the validation and report layers.

pub mod export;
pub mod report;
pub mod validate;

pub use export::ExportFormat;
pub use report::{handle_report_command, ReportCommands};
pub use validate::{handle_schemas_command, handle_validate_command, ValidateArgs};
