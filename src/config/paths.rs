//! Path management for freight-quote
//!
//! Provides XDG-compliant path resolution for settings, schema files and
//! exports.
//!
//! ## Path Resolution Order
//!
//! 1. `FREIGHT_QUOTE_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/freight-quote` or `~/.config/freight-quote`
//! 3. Windows: `%APPDATA%\freight-quote`

use std::path::PathBuf;

use crate::error::QuoteError;

/// Environment variable that overrides the base directory
pub const BASE_DIR_ENV: &str = "FREIGHT_QUOTE_DIR";

/// Manages all paths used by freight-quote
#[derive(Debug, Clone)]
pub struct QuotePaths {
    /// Base directory for all freight-quote files
    base_dir: PathBuf,
}

impl QuotePaths {
    /// Create a new QuotePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, QuoteError> {
        let base_dir = if let Ok(custom) = std::env::var(BASE_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create QuotePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/freight-quote/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Directory searched for named schema files (`<name>.json`, `<name>.yaml`)
    pub fn schemas_dir(&self) -> PathBuf {
        self.base_dir.join("schemas")
    }

    /// Default directory for exported previews
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), QuoteError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| QuoteError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.schemas_dir())
            .map_err(|e| QuoteError::Io(format!("Failed to create schemas directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| QuoteError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }

    /// Check if freight-quote has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, QuoteError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                QuoteError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("freight-quote"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, QuoteError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| QuoteError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("freight-quote"))
}
