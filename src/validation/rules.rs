//! Leaf rules and rule sets
//!
//! A rule set is evaluated against a single value in declaration order and
//! reports the first rule that fails. Only `required` looks at empty values:
//! every other rule passes when the value is absent, null or `""`, so an
//! optional field is not flagged until something has been typed into it.

use regex::Regex;
use rust_decimal::prelude::*;
use serde_json::Value;
use std::fmt;

/// Predicate signature for code-registered custom rules
pub type CustomCheck = fn(Option<&Value>) -> bool;

/// The check a rule performs
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Fails on absent, null or empty-string values
    Required,
    /// Numeric value must be >= bound
    Min(Decimal),
    /// Numeric value must be <= bound
    Max(Decimal),
    /// Numeric value must be > 0
    Positive,
    /// String must have at least this many characters
    MinLength(usize),
    /// String must have at most this many characters
    MaxLength(usize),
    /// String must match the pattern
    Pattern(Regex),
    /// Array must have at least this many elements
    MinItems(usize),
    /// Named predicate supplied in code
    Custom { name: String, check: CustomCheck },
}

impl RuleKind {
    /// The rule's name as written in schema definitions
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Positive => "positive",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Pattern(_) => "pattern",
            Self::MinItems(_) => "min_items",
            Self::Custom { name, .. } => name,
        }
    }

    fn default_message(&self) -> String {
        match self {
            Self::Required => "This field is required".to_string(),
            Self::Min(bound) => format!("Must be at least {}", bound),
            Self::Max(bound) => format!("Must be at most {}", bound),
            Self::Positive => "Must be greater than zero".to_string(),
            Self::MinLength(len) => format!("Must be at least {} characters", len),
            Self::MaxLength(len) => format!("Must be at most {} characters", len),
            Self::Pattern(_) => "Invalid format".to_string(),
            Self::MinItems(1) => "At least one entry is required".to_string(),
            Self::MinItems(count) => format!("At least {} entries are required", count),
            Self::Custom { name, .. } => format!("Failed check '{}'", name),
        }
    }

    fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Self::Required => !is_blank(value),
            Self::Custom { check, .. } => check(value),
            Self::MinItems(count) => match value {
                Some(Value::Array(items)) => items.len() >= *count,
                _ => false,
            },
            // Remaining rules only judge values that are present
            _ if is_blank(value) => true,
            Self::Min(bound) => as_decimal(value).is_some_and(|n| n >= *bound),
            Self::Max(bound) => as_decimal(value).is_some_and(|n| n <= *bound),
            Self::Positive => as_decimal(value).is_some_and(|n| n > Decimal::ZERO),
            Self::MinLength(len) => as_text(value).is_some_and(|s| s.chars().count() >= *len),
            Self::MaxLength(len) => as_text(value).is_some_and(|s| s.chars().count() <= *len),
            Self::Pattern(re) => as_text(value).is_some_and(|s| re.is_match(&s)),
        }
    }
}

/// Absent, null, or the empty string
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn as_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A single rule with an optional message override
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: Option<String>,
}

impl Rule {
    /// Create a rule with its default message
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// The message reported when this rule fails
    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.kind.default_message())
    }

    /// Evaluate the rule, returning a violation on failure
    pub fn check(&self, value: Option<&Value>) -> Option<Violation> {
        if self.kind.passes(value) {
            None
        } else {
            Some(Violation {
                rule: self.kind.name().to_string(),
                message: self.message(),
            })
        }
    }
}

/// A failed rule: which rule, and what to tell the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

/// Ordered rules for one leaf (or one array node)
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set; always passes
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Builder: append a rule kind with its default message
    pub fn with(mut self, kind: RuleKind) -> Self {
        self.rules.push(Rule::new(kind));
        self
    }

    pub fn required(self) -> Self {
        self.with(RuleKind::Required)
    }

    pub fn min(self, bound: Decimal) -> Self {
        self.with(RuleKind::Min(bound))
    }

    pub fn max(self, bound: Decimal) -> Self {
        self.with(RuleKind::Max(bound))
    }

    pub fn positive(self) -> Self {
        self.with(RuleKind::Positive)
    }

    pub fn min_length(self, len: usize) -> Self {
        self.with(RuleKind::MinLength(len))
    }

    pub fn max_length(self, len: usize) -> Self {
        self.with(RuleKind::MaxLength(len))
    }

    pub fn pattern(self, re: Regex) -> Self {
        self.with(RuleKind::Pattern(re))
    }

    pub fn min_items(self, count: usize) -> Self {
        self.with(RuleKind::MinItems(count))
    }

    pub fn custom(self, name: impl Into<String>, check: CustomCheck) -> Self {
        self.with(RuleKind::Custom {
            name: name.into(),
            check,
        })
    }

    /// Builder: override the message of the most recently added rule
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.rules.last_mut() {
            last.message = Some(message.into());
        }
        self
    }

    /// Check if no rules are configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of configured rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Iterate over the rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Evaluate in declaration order and return the first violation
    pub fn evaluate(&self, value: Option<&Value>) -> Option<Violation> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }
}
