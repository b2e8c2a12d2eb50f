//! Validation of JSON values against the generated schema subset
//!
//! Supports `type`, `enum`, `required`, `properties`, `items` and
//! `minItems`. Unknown keys in the instance are allowed.

use super::types::ValueKind;
use serde_json::Value;

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location in the instance (`$`, `$.Solver`, `$.Boundaries.Port[0]`)
    pub path: String,
    /// What went wrong
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate `value` against `schema`, collecting every violation
pub fn validate(schema: &Value, value: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    validate_at(schema, value, "$", &mut violations);
    violations
}

/// Whether `value` satisfies `schema`
pub fn is_valid(schema: &Value, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_at(schema: &Value, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let actual = ValueKind::of(value);

    if let Some(allowed) = allowed_kinds(schema) {
        if !allowed.contains(&actual) {
            let names: Vec<_> = allowed.iter().map(|k| k.as_str()).collect();
            out.push(violation(path, format!("{actual} not in [{}]", names.join(", "))));
        }
    }

    if let Some(options) = schema.get("enum").and_then(Value::as_array) {
        if !options.contains(value) {
            out.push(violation(path, format!("{value} not in {}", Value::from(options.clone()))));
        }
    }

    match value {
        Value::Object(map) => {
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for key in required.iter().filter_map(Value::as_str) {
                    if !map.contains_key(key) {
                        out.push(violation(path, format!("missing required key '{key}'")));
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, child) in map {
                    if let Some(child_schema) = properties.get(key) {
                        validate_at(child_schema, child, &format!("{path}.{key}"), out);
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
                if (items.len() as u64) < min {
                    out.push(violation(
                        path,
                        format!("expected at least {min} items, found {}", items.len()),
                    ));
                }
            }
            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    validate_at(item_schema, item, &format!("{path}[{index}]"), out);
                }
            }
        }
        _ => {}
    }
}

fn allowed_kinds(schema: &Value) -> Option<Vec<ValueKind>> {
    match schema.get("type")? {
        Value::String(name) => Some(ValueKind::from_name(name).into_iter().collect()),
        Value::Array(names) => Some(
            names
                .iter()
                .filter_map(Value::as_str)
                .filter_map(ValueKind::from_name)
                .collect(),
        ),
        _ => None,
    }
}

fn violation(path: &str, message: String) -> Violation {
    Violation {
        path: path.to_string(),
        message,
    }
}
