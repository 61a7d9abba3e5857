//! Built-in schemas for the quote forms

use serde_json::Value;

use super::rules::RuleSet;
use super::schema::SchemaNode;
use crate::models::CurrencySpec;

/// Names accepted by [`builtin`]
pub const BUILTIN_NAMES: [&str; 5] = ["header", "currency", "quote", "section", "item"];

fn required(message: &str) -> SchemaNode {
    SchemaNode::leaf(RuleSet::new().required().message(message))
}

/// True when the value resolves to a non-empty currency code
fn has_currency_code(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !CurrencySpec::from_value(v.clone()).resolve().is_empty())
}

/// The new-quote dialog: title and time slot
pub fn quote_header_schema() -> SchemaNode {
    SchemaNode::object([
        ("title", required("Quote title is required")),
        ("start_time", required("Start time is required")),
        ("end_time", required("End time is required")),
    ])
}

/// The section currency dialog (structured currency record)
pub fn section_currency_schema() -> SchemaNode {
    SchemaNode::object([
        ("currency", required("Currency is required")),
        ("customer_currency", required("Customer currency is required")),
        (
            "exchange_rate",
            SchemaNode::leaf(
                RuleSet::new()
                    .required()
                    .message("Exchange rate is required")
                    .positive()
                    .message("Exchange rate must be greater than zero"),
            ),
        ),
    ])
}

/// One line item row
pub fn line_item_schema() -> SchemaNode {
    SchemaNode::object([
        ("basis", required("Basis is required")),
        ("unit_of_measurement", required("Unit of measurement is required")),
        ("unit", required("Unit is required")),
        ("rate", required("Rate is required")),
        ("amount", required("Amount is required")),
    ])
}

/// One section with its currency and line items
pub fn section_schema() -> SchemaNode {
    SchemaNode::object([
        ("section_name", required("Section name is required")),
        (
            "section_currency",
            SchemaNode::leaf(
                RuleSet::new()
                    .required()
                    .message("Section currency is required")
                    .custom("currency_code", has_currency_code)
                    .message("Section currency is required"),
            ),
        ),
        (
            "section_data",
            SchemaNode::array_with_rules(
                line_item_schema(),
                RuleSet::new().min_items(1).message("Add at least one line item"),
            ),
        ),
    ])
}

/// A complete quote ready for submission
pub fn quote_schema() -> SchemaNode {
    SchemaNode::object([
        ("quote_title", required("Quote title is required")),
        ("quote_date", required("Quote date is required")),
        (
            "sections",
            SchemaNode::array_with_rules(
                section_schema(),
                RuleSet::new().min_items(1).message("Add at least one section"),
            ),
        ),
    ])
}

/// Look up a built-in schema by name
pub fn builtin(name: &str) -> Option<SchemaNode> {
    match name {
        "header" => Some(quote_header_schema()),
        "currency" => Some(section_currency_schema()),
        "quote" => Some(quote_schema()),
        "section" => Some(section_schema()),
        "item" => Some(line_item_schema()),
        _ => None,
    }
}
