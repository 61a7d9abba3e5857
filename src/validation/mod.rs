//! Schema-driven form validation
//!
//! A schema mirrors the shape of the data: leaves carry rule sets, objects
//! carry named children and arrays carry one element schema. [`validate`]
//! produces a raw error tree of the same shape and [`transform`] turns it
//! into the caller-facing [`ValidationResult`].

pub mod engine;
pub mod rules;
pub mod schema;
pub mod schemas;
pub mod transform;
pub mod tree;

pub use engine::{validate, validate_model};
pub use rules::{CustomCheck, Rule, RuleKind, RuleSet, Violation};
pub use schema::{SchemaDefinitionError, SchemaNode, ValidationSchema};
pub use transform::{transform, validate_form, ValidationMeta, ValidationResult};
pub use tree::{ErrorTree, RawErrorTree};
