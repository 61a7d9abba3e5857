//! Caller-facing validation results

use serde::Serialize;
use serde_json::Value;

use super::engine::validate;
use super::rules::Violation;
use super::schema::SchemaNode;
use super::tree::{ErrorTree, RawErrorTree};

/// Summary flags for a validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationMeta {
    /// True when no node anywhere in the tree carries an error
    pub is_empty: bool,
}

/// Cleaned error tree plus summary, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: ErrorTree,
    pub meta: ValidationMeta,
}

impl ValidationResult {
    /// Shorthand for `meta.is_empty`
    pub fn is_valid(&self) -> bool {
        self.meta.is_empty
    }

    /// The error message at a dotted path, if any
    pub fn error_at(&self, path: &str) -> Option<&str> {
        self.errors.at(path)
    }
}

/// Clean a raw error tree and compute its summary
pub fn transform(raw: &RawErrorTree) -> ValidationResult {
    let errors = clean(raw);
    let is_empty = !raw.has_errors();
    debug_assert_eq!(is_empty, errors.is_clean());
    ValidationResult {
        errors,
        meta: ValidationMeta { is_empty },
    }
}

/// Validate and transform in one step
pub fn validate_form(data: &Value, schema: &SchemaNode) -> ValidationResult {
    let result = transform(&validate(data, schema));
    tracing::debug!(is_empty = result.meta.is_empty, "Form validated");
    result
}

fn clean(raw: &RawErrorTree) -> ErrorTree {
    match raw {
        RawErrorTree::Leaf(violation) => ErrorTree::Leaf(message_of(violation.as_ref())),
        RawErrorTree::Object(fields) => ErrorTree::Object(
            fields
                .iter()
                .map(|(name, child)| (name.clone(), clean(child)))
                .collect(),
        ),
        RawErrorTree::Array { violation, items } => ErrorTree::Array {
            message: message_of(violation.as_ref()),
            items: items.iter().map(clean).collect(),
        },
    }
}

fn message_of(violation: Option<&Violation>) -> Option<String> {
    violation
        .map(|v| v.message.clone())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::RuleSet;
    use serde_json::json;

    fn title_schema() -> SchemaNode {
        SchemaNode::object([("title", SchemaNode::leaf(RuleSet::new().required()))])
    }

    #[test]
    fn test_blank_title_is_not_empty() {
        let result = validate_form(&json!({"title": ""}), &title_schema());
        assert!(!result.meta.is_empty);
        assert_eq!(result.error_at("title"), Some("This field is required"));
    }

    #[test]
    fn test_filled_title_is_empty() {
        let result = validate_form(&json!({"title": "Air Freight"}), &title_schema());
        assert!(result.meta.is_empty);
        assert!(result.is_valid());
        assert_eq!(result.error_at("title"), None);
    }

    #[test]
    fn test_all_empty_nested_object_counts_as_empty() {
        let raw = RawErrorTree::Object(vec![(
            "sections".into(),
            RawErrorTree::Object(vec![
                ("a".into(), RawErrorTree::Leaf(None)),
                ("b".into(), RawErrorTree::Object(vec![])),
            ]),
        )]);
        assert!(transform(&raw).meta.is_empty);
    }

    #[test]
    fn test_error_deep_in_array_is_found() {
        let raw = RawErrorTree::Object(vec![(
            "sections".into(),
            RawErrorTree::Array {
                violation: None,
                items: vec![RawErrorTree::Object(vec![(
                    "section_data".into(),
                    RawErrorTree::Array {
                        violation: None,
                        items: vec![RawErrorTree::Object(vec![(
                            "basis".into(),
                            RawErrorTree::Leaf(Some(Violation {
                                rule: "required".into(),
                                message: "Basis is required".into(),
                            })),
                        )])],
                    },
                )])],
            },
        )]);
        let result = transform(&raw);
        assert!(!result.meta.is_empty);
        assert_eq!(
            result.error_at("sections.0.section_data.0.basis"),
            Some("Basis is required")
        );
    }

    #[test]
    fn test_empty_messages_normalize_to_no_error() {
        let raw = RawErrorTree::Leaf(Some(Violation {
            rule: "custom".into(),
            message: String::new(),
        }));
        let result = transform(&raw);
        assert_eq!(result.errors, ErrorTree::Leaf(None));
        assert!(result.meta.is_empty);
    }

    #[test]
    fn test_serialized_shape() {
        let result = validate_form(&json!({"title": ""}), &title_schema());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "errors": { "title": "This field is required" },
                "meta": { "is_empty": false }
            })
        );
    }

    #[test]
    fn test_is_empty_iff_every_rule_passes() {
        let schema = SchemaNode::object([
            ("title", SchemaNode::leaf(RuleSet::new().required().max_length(10))),
            (
                "sections",
                SchemaNode::array_with_rules(
                    SchemaNode::object([("rate", SchemaNode::leaf(RuleSet::new().positive()))]),
                    RuleSet::new().min_items(1),
                ),
            ),
        ]);
        let cases = [
            (json!({"title": "Sea", "sections": [{"rate": 2}]}), true),
            (json!({"title": "Sea", "sections": [{}]}), true),
            (json!({"title": "Sea freight to Lagos", "sections": [{"rate": 2}]}), false),
            (json!({"title": "Sea", "sections": [{"rate": -2}]}), false),
            (json!({"title": "Sea", "sections": []}), false),
            (json!({"sections": [{"rate": 2}]}), false),
        ];
        for (data, expected) in cases {
            assert_eq!(validate_form(&data, &schema).meta.is_empty, expected, "{}", data);
        }
    }

    #[test]
    fn test_short_array_keeps_element_errors_when_serialized() {
        let schema = SchemaNode::object([(
            "sections",
            SchemaNode::array_with_rules(
                SchemaNode::object([("section_name", SchemaNode::leaf(RuleSet::new().required()))]),
                RuleSet::new().min_items(2),
            ),
        )]);
        let result = validate_form(&json!({"sections": [{"section_name": ""}]}), &schema);

        assert_eq!(result.error_at("sections"), Some("At least 2 entries are required"));
        assert_eq!(result.error_at("sections.0.section_name"), Some("This field is required"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "errors": {
                    "sections": {
                        "$message": "At least 2 entries are required",
                        "items": [ { "section_name": "This field is required" } ]
                    }
                },
                "meta": { "is_empty": false }
            })
        );
    }
}
