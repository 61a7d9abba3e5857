//! Validation schema tree
//!
//! A schema mirrors the shape of the data it validates: leaves hold rule
//! sets, object nodes hold named child schemas, and array nodes hold one
//! element schema applied to every element (plus optional rules for the
//! array itself).
//!
//! Schemas can also be loaded from JSON or YAML definitions written in the
//! nested form used by form configuration:
//!
//! ```json
//! {
//!   "quote_title": { "required": {} },
//!   "sections": {
//!     "$rules": { "min_items": 1 },
//!     "$each": { "section_name": { "required": { "message": "Name it" } } }
//!   },
//!   "tags": [ { "label": { "max_length": 20 } } ]
//! }
//! ```
//!
//! An object whose keys are all rule names is a leaf; `{}` is a leaf with no
//! rules. A one-element list is an array node, as is an object with `$each`.
//! Fields whose names collide with rule names are declared under `$fields`:
//!
//! ```json
//! { "weight": { "$fields": { "min": { "required": {} }, "max": { "required": {} } } } }
//! ```

use regex::Regex;
use rust_decimal::prelude::*;
use serde_json::{Map, Value};
use std::fmt;

use super::rules::{Rule, RuleKind, RuleSet};

/// Rule names understood in schema definitions
pub const RULE_NAMES: [&str; 8] = [
    "required",
    "min",
    "max",
    "positive",
    "min_length",
    "max_length",
    "pattern",
    "min_items",
];

const EACH_KEY: &str = "$each";
const RULES_KEY: &str = "$rules";
const FIELDS_KEY: &str = "$fields";

/// A node of a validation schema
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// Rules for a single value
    Leaf(RuleSet),
    /// Named fields, validated in declaration order
    Object(Vec<(String, SchemaNode)>),
    /// One schema applied to each element, plus rules for the array itself
    Array {
        element: Box<SchemaNode>,
        rules: RuleSet,
    },
}

/// Alias used where a whole form schema is meant
pub type ValidationSchema = SchemaNode;

impl SchemaNode {
    /// A leaf node
    pub fn leaf(rules: RuleSet) -> Self {
        Self::Leaf(rules)
    }

    /// An object node from `(field, schema)` pairs
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// An array node without array-level rules
    pub fn array(element: SchemaNode) -> Self {
        Self::Array {
            element: Box::new(element),
            rules: RuleSet::new(),
        }
    }

    /// An array node with array-level rules
    pub fn array_with_rules(element: SchemaNode, rules: RuleSet) -> Self {
        Self::Array {
            element: Box::new(element),
            rules,
        }
    }

    /// Look up a direct child of an object node
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            Self::Object(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, s)| s),
            _ => None,
        }
    }

    /// Count the leaves reachable from this node
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Object(fields) => fields.iter().map(|(_, node)| node.leaf_count()).sum(),
            Self::Array { element, .. } => element.leaf_count(),
        }
    }

    /// Build a schema from a JSON (or YAML-decoded) definition
    pub fn from_value(value: &Value) -> Result<Self, SchemaDefinitionError> {
        parse_node(value, "")
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn parse_node(value: &Value, path: &str) -> Result<SchemaNode, SchemaDefinitionError> {
    match value {
        Value::Array(elements) => match elements.as_slice() {
            [element] => Ok(SchemaNode::array(parse_node(element, &join_path(path, "0"))?)),
            _ => Err(SchemaDefinitionError::new(
                path,
                "an array schema must contain exactly one element schema",
            )),
        },
        Value::Object(map) if map.contains_key(EACH_KEY) || map.contains_key(RULES_KEY) => {
            parse_array_object(map, path)
        }
        Value::Object(map) if map.contains_key(FIELDS_KEY) => parse_fields_object(map, path),
        Value::Object(map) => {
            let rule_keys = map.keys().filter(|k| RULE_NAMES.contains(&k.as_str())).count();

            if rule_keys == map.len() {
                return parse_rule_set(map, path).map(SchemaNode::Leaf).map_err(|mut err| {
                    err.reason.push_str(&format!(
                        " (to declare fields named like rules, wrap them in '{}')",
                        FIELDS_KEY
                    ));
                    err
                });
            }

            if rule_keys > 0 {
                return Err(SchemaDefinitionError::new(
                    path,
                    "cannot mix rule names with field names in one object",
                ));
            }

            parse_fields(map, path)
        }
        other => Err(SchemaDefinitionError::new(
            path,
            format!("expected an object or a one-element list, found {}", other),
        )),
    }
}

fn parse_fields(map: &Map<String, Value>, path: &str) -> Result<SchemaNode, SchemaDefinitionError> {
    let mut fields = Vec::with_capacity(map.len());
    for (name, child) in map {
        fields.push((name.clone(), parse_node(child, &join_path(path, name))?));
    }
    Ok(SchemaNode::Object(fields))
}

/// `{"$fields": {...}}`: every key is a field, even one named like a rule
fn parse_fields_object(
    map: &Map<String, Value>,
    path: &str,
) -> Result<SchemaNode, SchemaDefinitionError> {
    if let Some(key) = map.keys().find(|k| *k != FIELDS_KEY) {
        return Err(SchemaDefinitionError::new(
            path,
            format!("unexpected key '{}' next to '{}'", key, FIELDS_KEY),
        ));
    }

    match map.get(FIELDS_KEY) {
        Some(Value::Object(fields)) => parse_fields(fields, path),
        _ => Err(SchemaDefinitionError::new(
            path,
            format!("'{}' must be an object of field schemas", FIELDS_KEY),
        )),
    }
}

fn parse_array_object(
    map: &Map<String, Value>,
    path: &str,
) -> Result<SchemaNode, SchemaDefinitionError> {
    if let Some(key) = map.keys().find(|k| *k != EACH_KEY && *k != RULES_KEY) {
        return Err(SchemaDefinitionError::new(
            path,
            format!("unexpected key '{}' next to '{}'", key, EACH_KEY),
        ));
    }

    let element = match map.get(EACH_KEY) {
        Some(each) => parse_node(each, &join_path(path, "0"))?,
        None => return Err(SchemaDefinitionError::new(path, "missing '$each'")),
    };

    let rules = match map.get(RULES_KEY) {
        None => RuleSet::new(),
        Some(Value::Object(rules)) => parse_rule_set(rules, path)?,
        Some(_) => {
            return Err(SchemaDefinitionError::new(
                path,
                "'$rules' must be an object of rules",
            ))
        }
    };

    Ok(SchemaNode::array_with_rules(element, rules))
}

fn parse_rule_set(
    map: &Map<String, Value>,
    path: &str,
) -> Result<RuleSet, SchemaDefinitionError> {
    let mut rules = RuleSet::new();
    for (name, config) in map {
        if let Some(rule) = parse_rule(name, config, path)? {
            rules.push(rule);
        }
    }
    Ok(rules)
}

/// Parse one rule; `false` disables it
fn parse_rule(name: &str, config: &Value, path: &str) -> Result<Option<Rule>, SchemaDefinitionError> {
    let (argument, message) = match config {
        Value::Bool(false) => return Ok(None),
        Value::Object(options) => {
            let message = match options.get("message") {
                None => None,
                Some(Value::String(m)) => Some(m.clone()),
                Some(_) => {
                    return Err(SchemaDefinitionError::new(
                        path,
                        format!("'{}' message must be a string", name),
                    ))
                }
            };
            (options.get("value").cloned(), message)
        }
        other => (Some(other.clone()), None),
    };

    let kind = match name {
        "required" => RuleKind::Required,
        "positive" => RuleKind::Positive,
        "min" => RuleKind::Min(decimal_argument(name, argument.as_ref(), path)?),
        "max" => RuleKind::Max(decimal_argument(name, argument.as_ref(), path)?),
        "min_length" => RuleKind::MinLength(count_argument(name, argument.as_ref(), path)?),
        "max_length" => RuleKind::MaxLength(count_argument(name, argument.as_ref(), path)?),
        "min_items" => RuleKind::MinItems(count_argument(name, argument.as_ref(), path)?),
        "pattern" => {
            let source = argument.as_ref().and_then(Value::as_str).ok_or_else(|| {
                SchemaDefinitionError::new(path, "'pattern' needs a regular expression string")
            })?;
            let re = Regex::new(source).map_err(|e| {
                SchemaDefinitionError::new(path, format!("invalid pattern '{}': {}", source, e))
            })?;
            RuleKind::Pattern(re)
        }
        unknown => {
            return Err(SchemaDefinitionError::new(
                path,
                format!("unknown rule '{}'", unknown),
            ))
        }
    };

    Ok(Some(Rule { kind, message }))
}

fn decimal_argument(
    name: &str,
    argument: Option<&Value>,
    path: &str,
) -> Result<Decimal, SchemaDefinitionError> {
    let parsed = match argument {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed.ok_or_else(|| SchemaDefinitionError::new(path, format!("'{}' needs a number", name)))
}

fn count_argument(
    name: &str,
    argument: Option<&Value>,
    path: &str,
) -> Result<usize, SchemaDefinitionError> {
    argument
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            SchemaDefinitionError::new(path, format!("'{}' needs a non-negative integer", name))
        })
}

/// A schema definition that could not be turned into a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinitionError {
    /// Dotted path of the offending node ("" for the root)
    pub path: String,
    pub reason: String,
}

impl SchemaDefinitionError {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SchemaDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at schema root: {}", self.reason)
        } else {
            write!(f, "at '{}': {}", self.path, self.reason)
        }
    }
}

impl std::error::Error for SchemaDefinitionError {}

impl From<SchemaDefinitionError> for crate::error::QuoteError {
    fn from(err: SchemaDefinitionError) -> Self {
        Self::Schema(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_leaf() {
        let schema = SchemaNode::from_value(&json!({ "title": { "required": {} } })).unwrap();
        match schema.field("title") {
            Some(SchemaNode::Leaf(rules)) => assert_eq!(rules.len(), 1),
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_is_rule_less_leaf() {
        let schema = SchemaNode::from_value(&json!({ "notes": {} })).unwrap();
        assert!(matches!(schema.field("notes"), Some(SchemaNode::Leaf(r)) if r.is_empty()));
    }

    #[test]
    fn test_parse_arrays() {
        let schema = SchemaNode::from_value(&json!({
            "items": [ { "basis": { "required": {} } } ],
            "sections": { "$rules": { "min_items": 1 }, "$each": { "name": { "required": true } } }
        }))
        .unwrap();

        assert!(matches!(schema.field("items"), Some(SchemaNode::Array { rules, .. }) if rules.is_empty()));
        assert!(matches!(schema.field("sections"), Some(SchemaNode::Array { rules, .. }) if rules.len() == 1));
        assert_eq!(schema.leaf_count(), 2);
    }

    #[test]
    fn test_rule_arguments_and_messages() {
        let schema = SchemaNode::from_value(&json!({
            "rate": { "required": { "message": "Rate please" }, "min": { "value": 0 }, "max": 10000 },
            "code": { "pattern": "^[A-Z]{3}$", "min_length": 3 },
            "memo": { "required": false }
        }))
        .unwrap();

        match schema.field("rate") {
            Some(SchemaNode::Leaf(rules)) => {
                let first = rules.iter().next().unwrap();
                assert_eq!(first.message.as_deref(), Some("Rate please"));
                assert_eq!(rules.len(), 3);
            }
            other => panic!("expected leaf, got {:?}", other),
        }
        assert!(matches!(schema.field("memo"), Some(SchemaNode::Leaf(r)) if r.is_empty()));
    }

    #[test]
    fn test_definition_errors() {
        let mixed = SchemaNode::from_value(&json!({ "title": { "required": {}, "name": {} } }));
        assert_eq!(mixed.unwrap_err().path, "title");

        let bad_min = SchemaNode::from_value(&json!({ "unit": { "min": "lots" } }));
        assert!(bad_min.unwrap_err().reason.contains("'min' needs a number"));

        let bad_regex = SchemaNode::from_value(&json!({ "code": { "pattern": "([" } }));
        assert!(bad_regex.is_err());

        let rules_only = SchemaNode::from_value(&json!({ "items": { "$rules": { "min_items": 1 } } }));
        assert!(rules_only.unwrap_err().reason.contains("$each"));

        let two_elements = SchemaNode::from_value(&json!({ "items": [{}, {}] }));
        assert!(two_elements.is_err());

        let scalar = SchemaNode::from_value(&json!({ "title": "required" }));
        assert!(scalar.is_err());
    }

    #[test]
    fn test_error_converts_to_quote_error() {
        let err = SchemaNode::from_value(&json!(42)).unwrap_err();
        let quote_err: crate::error::QuoteError = err.into();
        assert!(quote_err.is_schema());
    }

    #[test]
    fn test_fields_named_like_rules() {
        let definition = json!({
            "weight": { "$fields": { "min": { "required": {} }, "max": { "positive": {} } } }
        });
        let schema = SchemaNode::from_value(&definition).unwrap();
        assert_eq!(schema.leaf_count(), 2);

        let weight = schema.field("weight").unwrap();
        assert!(matches!(weight.field("min"), Some(SchemaNode::Leaf(_))));
        assert!(matches!(weight.field("max"), Some(SchemaNode::Leaf(_))));
    }

    #[test]
    fn test_rule_name_field_error_points_to_fields_key() {
        let err = SchemaNode::from_value(&json!({ "min": { "required": {} } })).unwrap_err();
        assert!(err.reason.contains("'min' needs a number"));
        assert!(err.reason.contains("$fields"));

        let err = SchemaNode::from_value(&json!({ "$fields": [], "x": {} })).unwrap_err();
        assert!(err.reason.contains("unexpected key 'x'"));
        assert!(SchemaNode::from_value(&json!({ "$fields": 3 })).is_err());
    }
}
