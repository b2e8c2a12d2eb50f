//! Schema inference from example JSON files

use super::report::PathIndex;
use super::types::{SchemaArtifacts, SchemaNode, ValueKind, SCHEMA_DIALECT, SCHEMA_TITLE};
use serde_json::{json, Value};

/// Accumulates examples into a schema tree and a key-path index
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    root: SchemaNode,
    paths: PathIndex,
    example_count: usize,
}

impl SchemaInferrer {
    /// Create an empty inferrer
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one example, attributing its key paths to `file`
    pub fn add_example(&mut self, file: &str, value: &Value) {
        merge_value(&mut self.root, value);
        self.paths.record(value, file);
        self.example_count += 1;
    }

    /// Number of examples merged so far
    pub fn example_count(&self) -> usize {
        self.example_count
    }

    /// Schema tree before any hand-authored rules
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Key-path index
    pub fn paths(&self) -> &PathIndex {
        &self.paths
    }

    /// Apply `rules` and produce the schema document and report
    pub fn finish(mut self, rules: impl FnOnce(&mut SchemaNode)) -> SchemaArtifacts {
        rules(&mut self.root);

        let mut schema = json!({
            "$schema": SCHEMA_DIALECT,
            "title": SCHEMA_TITLE,
        });
        if let (Some(doc), Value::Object(body)) = (schema.as_object_mut(), self.root.to_json()) {
            doc.extend(body);
        }

        SchemaArtifacts {
            schema,
            report: self.paths.render_markdown(),
            example_count: self.example_count,
        }
    }
}

/// Union the kind and shape of `value` into `node`
pub fn merge_value(node: &mut SchemaNode, value: &Value) {
    node.add_kind(ValueKind::of(value));

    match value {
        Value::Object(map) => {
            // Touch properties so an empty object still emits `properties`
            let _ = node.properties.get_or_insert_with(Default::default);
            for (key, child) in map {
                merge_value(node.property_mut(key), child);
            }
        }
        Value::Array(items) => {
            let item_node = node.items_mut();
            for item in items {
                merge_value(item_node, item);
            }
        }
        _ => {}
    }
}

/// Infer a schema tree from standalone values (no rules, no report)
pub fn infer_schema<'a>(values: impl IntoIterator<Item = &'a Value>) -> SchemaNode {
    let mut root = SchemaNode::new();
    for value in values {
        merge_value(&mut root, value);
    }
    root
}
