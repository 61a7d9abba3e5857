//! First-run setup
//!
//! Creates the data directories, a default settings file and an editable
//! example schema definition.

use serde_json::json;

use super::file_io::write_json_atomic;
use crate::config::{QuotePaths, Settings};
use crate::error::QuoteError;

/// File name of the example schema written on first run
pub const EXAMPLE_SCHEMA: &str = "quote-header.json";

/// Initialize the data directory; existing files are left untouched
pub fn initialize_storage(paths: &QuotePaths) -> Result<(), QuoteError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    let example = paths.schemas_dir().join(EXAMPLE_SCHEMA);
    if !example.exists() {
        write_json_atomic(
            &example,
            &json!({
                "title": { "required": { "message": "Quote title is required" } },
                "start_time": { "required": {} },
                "end_time": { "required": {} }
            }),
        )?;
    }

    tracing::info!(base = %paths.base_dir().display(), "initialized data directory");
    Ok(())
}

/// Check if the data directory needs initialization
pub fn needs_initialization(paths: &QuotePaths) -> bool {
    !paths.is_initialized()
}
