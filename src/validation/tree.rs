//! Error trees
//!
//! Both trees have the shape of the validated data. The raw tree is what the
//! engine produces: each leaf holds the violated rule (if any). The cleaned
//! tree is what callers render: each leaf holds a message or nothing.

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use super::rules::Violation;

/// Key holding an array node's own message in serialized trees
pub const ARRAY_MESSAGE_KEY: &str = "$message";
/// Key holding an array node's element trees when it also has a message
pub const ARRAY_ITEMS_KEY: &str = "items";

/// Engine output, one node per schema node visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawErrorTree {
    Leaf(Option<Violation>),
    Object(Vec<(String, RawErrorTree)>),
    Array {
        violation: Option<Violation>,
        items: Vec<RawErrorTree>,
    },
}

impl RawErrorTree {
    /// Deep scan: does any node carry a non-empty message?
    pub fn has_errors(&self) -> bool {
        match self {
            Self::Leaf(violation) => is_truthy(violation.as_ref()),
            Self::Object(fields) => fields.iter().any(|(_, child)| child.has_errors()),
            Self::Array { violation, items } => {
                is_truthy(violation.as_ref()) || items.iter().any(RawErrorTree::has_errors)
            }
        }
    }
}

fn is_truthy(violation: Option<&Violation>) -> bool {
    violation.is_some_and(|v| !v.message.is_empty())
}

/// Caller-facing error tree; `None` leaves mean "no error"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTree {
    Leaf(Option<String>),
    Object(Vec<(String, ErrorTree)>),
    Array {
        message: Option<String>,
        items: Vec<ErrorTree>,
    },
}

impl ErrorTree {
    /// Deep scan: true when no node anywhere carries a message
    pub fn is_clean(&self) -> bool {
        match self {
            Self::Leaf(message) => message.is_none(),
            Self::Object(fields) => fields.iter().all(|(_, child)| child.is_clean()),
            Self::Array { message, items } => {
                message.is_none() && items.iter().all(ErrorTree::is_clean)
            }
        }
    }

    /// The message carried directly by this node, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Leaf(message) | Self::Array { message, .. } => message.as_deref(),
            Self::Object(_) => None,
        }
    }

    /// Navigate a dotted path such as `sections.0.section_currency.currency`
    pub fn subtree(&self, path: &str) -> Option<&ErrorTree> {
        let mut node = self;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            node = match node {
                Self::Object(fields) => fields
                    .iter()
                    .find(|(name, _)| name == segment)
                    .map(|(_, child)| child)?,
                Self::Array { items, .. } => items.get(segment.parse::<usize>().ok()?)?,
                Self::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// The message at a dotted path, if that path has an error
    pub fn at(&self, path: &str) -> Option<&str> {
        self.subtree(path).and_then(ErrorTree::message)
    }

    /// All `(path, message)` pairs, depth first in schema order
    pub fn messages(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        collect_messages(self, String::new(), &mut out);
        out
    }
}

fn collect_messages(node: &ErrorTree, path: String, out: &mut Vec<(String, String)>) {
    let child_path = |key: &str| {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        }
    };

    match node {
        ErrorTree::Leaf(Some(message)) => out.push((path.clone(), message.clone())),
        ErrorTree::Leaf(None) => {}
        ErrorTree::Object(fields) => {
            for (name, child) in fields {
                collect_messages(child, child_path(name), out);
            }
        }
        ErrorTree::Array { message, items } => {
            if let Some(message) = message {
                out.push((path.clone(), message.clone()));
            }
            for (idx, child) in items.iter().enumerate() {
                collect_messages(child, child_path(&idx.to_string()), out);
            }
        }
    }
}

/// Serialized form: clean leaves become `""`, objects become maps, arrays
/// become lists. An array node with its own message serializes as
/// `{"$message": message, "items": [...]}` so element errors are kept.
impl Serialize for ErrorTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Leaf(message) => serializer.serialize_str(message.as_deref().unwrap_or("")),
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, child) in fields {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
            Self::Array {
                message: Some(message),
                items,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(ARRAY_MESSAGE_KEY, message)?;
                map.serialize_entry(ARRAY_ITEMS_KEY, items)?;
                map.end()
            }
            Self::Array { items, .. } => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Serialized form: violated leaves become `{rule: message}`, clean leaves
/// become `null`. A violated array node becomes
/// `{"$message": {rule: message}, "items": [...]}`.
impl Serialize for RawErrorTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Leaf(None) => serializer.serialize_none(),
            Self::Leaf(Some(violation)) => RuleMessage(violation).serialize(serializer),
            Self::Array {
                violation: Some(violation),
                items,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(ARRAY_MESSAGE_KEY, &RuleMessage(violation))?;
                map.serialize_entry(ARRAY_ITEMS_KEY, items)?;
                map.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, child) in fields {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
            Self::Array { items, .. } => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

struct RuleMessage<'a>(&'a Violation);

impl Serialize for RuleMessage<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.rule, &self.0.message)?;
        map.end()
    }
}
