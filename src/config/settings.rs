//! User settings for freight-quote
//!
//! Holds display preferences for totals and previews: the fallback currency
//! shown when a selection has no priced sections, number formatting, extra
//! currency symbols and the terms printed under a quote preview.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::QuotePaths;
use crate::error::QuoteError;
use crate::storage::{read_json, write_json_atomic};

/// User settings for freight-quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency code used for the zero placeholder when there are no totals
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Decimal places shown for amounts
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Separator inserted between thousands groups
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    /// Extra or overriding currency symbols (code -> symbol)
    #[serde(default)]
    pub symbols: BTreeMap<String, String>,

    /// Terms and conditions printed under a preview
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "NGN".to_string()
}

fn default_date_format() -> String {
    "%-d/%-m/%Y".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

fn default_terms() -> Vec<String> {
    [
        "Above rates are for cargo details as provided by you.",
        "Above quote is/are subject to VAT.",
        "Above quoted rates are on Door-to-Door basis excludes of Duties at the time of exports.",
        "Standard Trading Terms and Conditions apply.",
        "Above rates exclude services like packing, re-packing, Customs Inspection etc which may be charged additionally (if required) with prior customer approval.",
        "Above rates do not cover Insurance charges.",
        "Above rates apply for weight/volume (whichever is higher). Rates are based on ratio 1:6.",
        "Quoted rates are valid for a period of one month.",
        "Charges are based on shipment details provided by you: if quantity/weight varies the quotation will change accordingly.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: default_currency(),
            date_format: default_date_format(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_separator(),
            symbols: BTreeMap::new(),
            terms: default_terms(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &QuotePaths) -> Result<Self, QuoteError> {
        let settings_path = paths.settings_file();

        // Missing file yields defaults; don't save yet, let caller decide when to persist
        let settings: Settings = read_json(&settings_path).map_err(|e| {
            QuoteError::Config(format!("Failed to load settings file: {}", e))
        })?;

        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &QuotePaths) -> Result<(), QuoteError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
            .map_err(|e| QuoteError::Config(format!("Failed to write settings file: {}", e)))
    }
}
