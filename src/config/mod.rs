//! Configuration module for freight-quote
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Display preferences for totals and previews

pub mod paths;
pub mod settings;

pub use paths::QuotePaths;
pub use settings::Settings;
