//! Schema-driven validation
//!
//! `validate` walks the schema and the data together and returns an error
//! tree with the schema's shape. It never fails: malformed or partial data
//! is reported through the tree.

use serde::Serialize;
use serde_json::Value;

use super::schema::SchemaNode;
use super::tree::RawErrorTree;

/// Validate `data` against `schema`
///
/// Fields present in the data but absent from the schema are ignored. Fields
/// absent from the data are validated as missing. Array schemas are applied
/// to each existing element; array-level rules see the whole array.
pub fn validate(data: &Value, schema: &SchemaNode) -> RawErrorTree {
    validate_node(Some(data), schema)
}

/// Serialize a model and validate the result
///
/// A model that cannot be represented as a value is validated as missing.
pub fn validate_model<T: Serialize>(model: &T, schema: &SchemaNode) -> RawErrorTree {
    match serde_json::to_value(model) {
        Ok(value) => validate(&value, schema),
        Err(e) => {
            tracing::warn!(error = %e, "Model could not be serialized for validation");
            validate_node(None, schema)
        }
    }
}

fn validate_node(value: Option<&Value>, schema: &SchemaNode) -> RawErrorTree {
    match schema {
        SchemaNode::Leaf(rules) => RawErrorTree::Leaf(rules.evaluate(value)),
        SchemaNode::Object(fields) => {
            // Non-object data leaves every field absent
            let object = value.and_then(Value::as_object);
            RawErrorTree::Object(
                fields
                    .iter()
                    .map(|(name, child)| {
                        let child_value = object.and_then(|o| o.get(name));
                        (name.clone(), validate_node(child_value, child))
                    })
                    .collect(),
            )
        }
        SchemaNode::Array { element, rules } => {
            let violation = rules.evaluate(value);
            let items = match value {
                Some(Value::Array(elements)) => elements
                    .iter()
                    .map(|item| validate_node(Some(item), element))
                    .collect(),
                _ => Vec::new(),
            };
            RawErrorTree::Array { violation, items }
        }
    }
}
