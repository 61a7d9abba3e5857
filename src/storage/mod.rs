//! File loading for freight-quote
//!
//! Quotes are read from files exported by the data layer; schemas and
//! settings live in the data directory. Writes are atomic.

pub mod file_io;
pub mod init;
pub mod quotes;
pub mod schemas;

pub use file_io::{read_json, read_json_required, read_structured, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use quotes::{find_quote, load_quotes};
pub use schemas::{list_schemas, load_schema_file, resolve_schema};
