//! CLI commands for form validation

use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::QuotePaths;
use crate::error::QuoteResult;
use crate::storage::{list_schemas, read_structured, resolve_schema};
use crate::validation::{validate_form, ValidationResult};

/// Arguments for `validate`
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Form data file (JSON or YAML)
    pub data: PathBuf,

    /// Built-in schema name, stored schema name or schema file
    #[arg(short, long, default_value = "quote")]
    pub schema: String,

    /// Print the validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the validate command
///
/// Returns whether the data passed every rule.
pub fn handle_validate_command(paths: &QuotePaths, args: ValidateArgs) -> QuoteResult<bool> {
    let schema = resolve_schema(&args.schema, paths)?;
    let data: Value = read_structured(&args.data)?;

    let result = validate_form(&data, &schema);
    tracing::info!(
        schema = %args.schema,
        valid = result.is_valid(),
        "validated {}",
        args.data.display()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_result(&result));
    }

    Ok(result.is_valid())
}

/// Terminal rendering: one line per error, then the verdict
pub fn format_result(result: &ValidationResult) -> String {
    let mut output = String::new();

    for (path, message) in result.errors.messages() {
        let path = if path.is_empty() { "(root)" } else { path.as_str() };
        output.push_str(&format!("  {}: {}\n", path, message));
    }

    if result.is_valid() {
        output.push_str("Valid\n");
    } else {
        output.push_str("Invalid\n");
    }

    output
}

/// Handle the schemas command
pub fn handle_schemas_command(paths: &QuotePaths) -> QuoteResult<()> {
    let (builtin, stored) = list_schemas(paths)?;

    println!("Built-in schemas:");
    for name in builtin {
        println!("  {}", name);
    }

    println!();
    println!("Stored schemas ({}):", paths.schemas_dir().display());
    if stored.is_empty() {
        println!("  (none)");
    }
    for name in stored {
        println!("  {}", name);
    }

    Ok(())
}
