//! Validation schema loading
//!
//! A schema argument is resolved in order: a built-in name, a definition
//! file in the schemas directory (`<name>.json`, `.yaml` or `.yml`), then a
//! path to a definition file.

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::file_io::read_structured;
use crate::config::QuotePaths;
use crate::error::{QuoteError, QuoteResult};
use crate::validation::{schemas, SchemaNode};

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Load a schema definition file
pub fn load_schema_file<P: AsRef<Path>>(path: P) -> QuoteResult<SchemaNode> {
    let path = path.as_ref();
    let definition: Value = read_structured(path)?;
    let schema = SchemaNode::from_value(&definition)?;
    tracing::debug!(path = %path.display(), leaves = schema.leaf_count(), "loaded schema");
    Ok(schema)
}

/// Resolve a schema by built-in name, stored name or file path
pub fn resolve_schema(name_or_path: &str, paths: &QuotePaths) -> QuoteResult<SchemaNode> {
    if let Some(schema) = schemas::builtin(name_or_path) {
        return Ok(schema);
    }

    if let Some(stored) = stored_schema_path(name_or_path, paths) {
        return load_schema_file(stored);
    }

    let path = Path::new(name_or_path);
    if path.is_file() {
        return load_schema_file(path);
    }

    Err(QuoteError::schema_not_found(name_or_path))
}

fn stored_schema_path(name: &str, paths: &QuotePaths) -> Option<PathBuf> {
    if name.contains(['/', '\\']) {
        return None;
    }
    EXTENSIONS
        .iter()
        .map(|ext| paths.schemas_dir().join(format!("{}.{}", name, ext)))
        .find(|candidate| candidate.is_file())
}

/// Names of the built-in schemas and of the definitions in the schemas
/// directory, sorted within each group
pub fn list_schemas(paths: &QuotePaths) -> QuoteResult<(Vec<String>, Vec<String>)> {
    let builtin = schemas::BUILTIN_NAMES.iter().map(|s| s.to_string()).collect();

    let dir = paths.schemas_dir();
    let mut stored = Vec::new();
    if dir.is_dir() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            let known_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.contains(&e));
            if let (true, Some(stem)) = (known_ext, path.file_stem().and_then(|s| s.to_str())) {
                stored.push(stem.to_string());
            }
        }
    }
    stored.sort();
    stored.dedup();

    Ok((builtin, stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn paths() -> (TempDir, QuotePaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuotePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        (temp_dir, paths)
    }

    #[test]
    fn test_resolve_builtin() {
        let (_temp_dir, paths) = paths();
        let schema = resolve_schema("header", &paths).unwrap();
        assert_eq!(schema.leaf_count(), 3);
    }

    #[test]
    fn test_resolve_stored_yaml() {
        let (_temp_dir, paths) = paths();
        std::fs::write(
            paths.schemas_dir().join("booking.yaml"),
            "title:\n  required: {}\nweight:\n  positive: {message: Weight must be positive}\n",
        )
        .unwrap();

        let schema = resolve_schema("booking", &paths).unwrap();
        let result = crate::validation::validate_form(&json!({"title": "x", "weight": -1}), &schema);
        assert_eq!(result.error_at("weight"), Some("Weight must be positive"));

        let (_, stored) = list_schemas(&paths).unwrap();
        assert_eq!(stored, vec!["booking".to_string()]);
    }

    #[test]
    fn test_resolve_path() {
        let (temp_dir, paths) = paths();
        let path = temp_dir.path().join("custom.json");
        std::fs::write(&path, r#"{"title": {"required": {}}}"#).unwrap();

        let schema = resolve_schema(path.to_str().unwrap(), &paths).unwrap();
        assert_eq!(schema.leaf_count(), 1);
    }

    #[test]
    fn test_bad_definition_is_a_schema_error() {
        let (temp_dir, paths) = paths();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"title": {"required": {}, "nested": {}}}"#).unwrap();

        let err = resolve_schema(path.to_str().unwrap(), &paths).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_unknown_schema() {
        let (_temp_dir, paths) = paths();
        let err = resolve_schema("missing", &paths).unwrap_err();
        assert!(err.is_not_found());
    }
}
