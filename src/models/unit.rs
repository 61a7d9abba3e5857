//! Units of measurement for line items
//!
//! Line items carry a measurement code; known codes get a display label and
//! any other code is kept and displayed as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a line item's `unit` quantity is measured
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitOfMeasurement {
    PerKg,
    PerCbm,
    PerContainer,
    PerPallet,
    PerShipment,
    FlatRate,
    /// A code this build does not know; shown verbatim
    Other(String),
}

impl UnitOfMeasurement {
    /// All known units, in display order
    pub const KNOWN: [UnitOfMeasurement; 6] = [
        Self::PerKg,
        Self::PerCbm,
        Self::PerContainer,
        Self::PerPallet,
        Self::PerShipment,
        Self::FlatRate,
    ];

    /// Parse a measurement code (case-insensitive for known codes)
    pub fn parse(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "per_kg" | "kg" => Self::PerKg,
            "per_cbm" | "cbm" => Self::PerCbm,
            "per_container" | "container" => Self::PerContainer,
            "per_pallet" | "pallet" => Self::PerPallet,
            "per_shipment" | "shipment" => Self::PerShipment,
            "flat_rate" | "flat" => Self::FlatRate,
            _ => Self::Other(code.to_string()),
        }
    }

    /// The stored code
    pub fn code(&self) -> &str {
        match self {
            Self::PerKg => "per_kg",
            Self::PerCbm => "per_cbm",
            Self::PerContainer => "per_container",
            Self::PerPallet => "per_pallet",
            Self::PerShipment => "per_shipment",
            Self::FlatRate => "flat_rate",
            Self::Other(code) => code,
        }
    }

    /// Human-readable label, falling back to the raw code
    pub fn label(&self) -> &str {
        match self {
            Self::PerKg => "Per Kg",
            Self::PerCbm => "Per CBM",
            Self::PerContainer => "Per Container",
            Self::PerPallet => "Per Pallet",
            Self::PerShipment => "Per Shipment",
            Self::FlatRate => "Flat Rate",
            Self::Other(code) => code,
        }
    }

    /// Check if this is one of the known units
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for UnitOfMeasurement {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for UnitOfMeasurement {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<UnitOfMeasurement> for String {
    fn from(unit: UnitOfMeasurement) -> Self {
        unit.code().to_string()
    }
}

impl fmt::Display for UnitOfMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
