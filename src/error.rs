//! Custom error types for freight-quote
//!
//! Only the outer layers (configuration, file loading, schema definitions,
//! exports and the CLI) produce these errors. Validation and aggregation
//! never fail: their problems are reported through the returned values.

use thiserror::Error;

/// The main error type for freight-quote operations
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// A validation schema definition could not be understood
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid user input outside of form validation (CLI arguments, ids)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Input file loading errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl QuoteError {
    /// Create a "not found" error for quotes
    pub fn quote_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Quote",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for built-in or on-disk schemas
    pub fn schema_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Schema",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a schema definition error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

impl From<std::io::Error> for QuoteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for QuoteError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for freight-quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;
