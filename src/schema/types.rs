//! Schema types

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// JSON Schema dialect written into `$schema`
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Title of the generated document
pub const SCHEMA_TITLE: &str = "Palace Examples Schema";

/// Kind of a JSON value.
///
/// Declaration order is alphabetical so that sorted sets match sorted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Array,
    Boolean,
    Null,
    Number,
    Object,
    String,
}

impl ValueKind {
    /// Kind of a value; integers and floats are both `Number`
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Lowercase JSON Schema name
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Array => "array",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::Number => "number",
            ValueKind::Object => "object",
            ValueKind::String => "string",
        }
    }

    /// Parse a JSON Schema type name
    pub fn from_name(name: &str) -> Option<ValueKind> {
        match name {
            "array" => Some(ValueKind::Array),
            "boolean" => Some(ValueKind::Boolean),
            "null" => Some(ValueKind::Null),
            "number" => Some(ValueKind::Number),
            "object" => Some(ValueKind::Object),
            "string" => Some(ValueKind::String),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node of the inferred schema tree.
///
/// `properties` and `items` stay `None` until an object or array is seen,
/// so an empty object still emits `"properties": {}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaNode {
    /// Observed kinds
    pub kinds: BTreeSet<ValueKind>,
    /// Child schemas by key
    pub properties: Option<BTreeMap<String, SchemaNode>>,
    /// Schema shared by all array elements
    pub items: Option<Box<SchemaNode>>,
    /// Keys that must be present
    pub required: Option<BTreeSet<String>>,
    /// Allowed string values
    pub enum_values: Option<BTreeSet<String>>,
}

impl SchemaNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a kind
    pub fn add_kind(&mut self, kind: ValueKind) {
        self.kinds.insert(kind);
    }

    /// Child node for `key`, creating it if needed
    pub fn property_mut(&mut self, key: &str) -> &mut SchemaNode {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .entry(key.to_string())
            .or_default()
    }

    /// Child node for `key`
    pub fn property(&self, key: &str) -> Option<&SchemaNode> {
        self.properties.as_ref()?.get(key)
    }

    /// Item node, creating it if needed
    pub fn items_mut(&mut self) -> &mut SchemaNode {
        self.items.get_or_insert_with(Box::default)
    }

    /// Walk a key path, marking every node passed through as an object
    pub fn ensure_path(&mut self, path: &[&str]) -> &mut SchemaNode {
        let mut current = self;
        for key in path {
            current.add_kind(ValueKind::Object);
            current = current.property_mut(key);
        }
        current
    }

    /// Follow a key path without creating nodes
    pub fn lookup(&self, path: &[&str]) -> Option<&SchemaNode> {
        path.iter().try_fold(self, |node, key| node.property(key))
    }

    /// Add required keys
    pub fn require<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        self.required
            .get_or_insert_with(BTreeSet::new)
            .extend(keys.into_iter().map(str::to_string));
    }

    /// Constrain to a set of strings
    pub fn ensure_enum<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) {
        self.add_kind(ValueKind::String);
        self.enum_values
            .get_or_insert_with(BTreeSet::new)
            .extend(values.into_iter().map(str::to_string));
    }

    /// Emit the JSON Schema fragment for this node
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();

        match self.kinds.len() {
            0 => {}
            1 => {
                let kind = self.kinds.iter().next().copied().unwrap_or(ValueKind::Null);
                out.insert("type".to_string(), json!(kind.as_str()));
            }
            _ => {
                let kinds: Vec<_> = self.kinds.iter().map(|k| k.as_str()).collect();
                out.insert("type".to_string(), json!(kinds));
            }
        }

        if let Some(properties) = &self.properties {
            let children: Map<String, Value> = properties
                .iter()
                .map(|(key, child)| (key.clone(), child.to_json()))
                .collect();
            out.insert("properties".to_string(), Value::Object(children));
        }
        if let Some(items) = &self.items {
            out.insert("items".to_string(), items.to_json());
        }
        if let Some(required) = &self.required {
            out.insert("required".to_string(), json!(required));
        }
        if let Some(values) = &self.enum_values {
            out.insert("enum".to_string(), json!(values));
        }

        Value::Object(out)
    }
}

/// Generated schema document and report
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaArtifacts {
    /// Full JSON Schema document
    pub schema: Value,
    /// Markdown key-path report
    pub report: String,
    /// Number of example files merged
    pub example_count: usize,
}

impl SchemaArtifacts {
    /// Schema document as written to disk: pretty JSON with a trailing newline
    pub fn schema_text(&self) -> String {
        let mut text = serde_json::to_string_pretty(&self.schema).unwrap_or_default();
        text.push('\n');
        text
    }
}
