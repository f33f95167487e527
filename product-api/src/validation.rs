//! Declarative per-field validation.
//!
//! Rules run against the raw JSON body before anything is deserialized into a
//! typed request, so a `price` of `"Hello World"` still reaches the numeric and
//! positivity checks instead of dying inside serde. Every failing rule is
//! collected; the caller rejects with the full list.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// One violated rule: which field, and the human-readable reason.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A single predicate over one body field. `check` receives the field's value
/// (or `None` when the key is absent) and returns the error message on failure.
pub struct FieldRule {
    field: &'static str,
    check: fn(Option<&Value>) -> Option<&'static str>,
}

impl FieldRule {
    const fn new(field: &'static str, check: fn(Option<&Value>) -> Option<&'static str>) -> Self {
        Self { field, check }
    }

    fn apply(&self, body: &Value) -> Option<FieldError> {
        (self.check)(body.get(self.field)).map(|message| FieldError {
            field: self.field.to_string(),
            message: message.to_string(),
        })
    }
}

/// Runs the chain in order and collects every failure, not just the first.
pub fn run(rules: &[FieldRule], body: &Value) -> Vec<FieldError> {
    rules.iter().filter_map(|rule| rule.apply(body)).collect()
}

/// Path ids must be integers; anything else is one "Invalid ID" error.
pub fn check_id(raw: &str) -> Result<i64, FieldError> {
    raw.parse::<i64>().map_err(|_| FieldError {
        field: "id".to_string(),
        message: "Invalid ID".to_string(),
    })
}

fn name_required(value: Option<&Value>) -> Option<&'static str> {
    match value.and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => None,
        _ => Some("Name is required"),
    }
}

// `null` counts as present; the numeric rule catches it.
fn price_required(value: Option<&Value>) -> Option<&'static str> {
    match value {
        Some(_) => None,
        None => Some("Price is required"),
    }
}

fn price_numeric(value: Option<&Value>) -> Option<&'static str> {
    match value.and_then(Value::as_f64) {
        Some(_) => None,
        None => Some("Price must be a number"),
    }
}

fn price_positive(value: Option<&Value>) -> Option<&'static str> {
    match value.and_then(Value::as_f64) {
        Some(price) if price > 0.0 => None,
        _ => Some("Price must be a positive number"),
    }
}

fn availability_boolean(value: Option<&Value>) -> Option<&'static str> {
    match value {
        None => None,
        Some(Value::Bool(_)) => None,
        Some(_) => Some("Availability must be a boolean"),
    }
}

/// Chain for POST /api/products.
pub const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", name_required),
    FieldRule::new("price", price_required),
    FieldRule::new("price", price_numeric),
    FieldRule::new("price", price_positive),
];

/// Chain for PUT /api/products/{id}: create rules plus the availability type check.
pub const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", name_required),
    FieldRule::new("price", price_required),
    FieldRule::new("price", price_numeric),
    FieldRule::new("price", price_positive),
    FieldRule::new("availability", availability_boolean),
];
