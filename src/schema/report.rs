//! Key-path index and Markdown report

use super::types::ValueKind;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Kinds and source files observed at one key path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Observed kinds
    pub kinds: BTreeSet<ValueKind>,
    /// Files (repository-relative, forward slashes) containing the path
    pub files: BTreeSet<String>,
}

impl PathStats {
    /// More than one kind seen at this path
    pub fn has_conflict(&self) -> bool {
        self.kinds.len() > 1
    }
}

/// Index of every key path across all example files.
///
/// Paths are dotted (`Solver.Linear.Tol`); array elements append `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    paths: BTreeMap<String, PathStats>,
}

impl PathIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every path in `value`, attributing them to `file`
    pub fn record(&mut self, value: &Value, file: &str) {
        self.record_at("", value, file);
    }

    fn record_at(&mut self, path: &str, value: &Value, file: &str) {
        let stats = self.paths.entry(path.to_string()).or_default();
        stats.kinds.insert(ValueKind::of(value));
        stats.files.insert(file.to_string());

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    self.record_at(&child_path, child, file);
                }
            }
            Value::Array(items) => {
                let item_path = format!("{path}[]");
                for item in items {
                    self.record_at(&item_path, item, file);
                }
            }
            _ => {}
        }
    }

    /// Stats for one path
    pub fn get(&self, path: &str) -> Option<&PathStats> {
        self.paths.get(path)
    }

    /// All paths in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathStats)> {
        self.paths.iter().map(|(path, stats)| (path.as_str(), stats))
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no path has been recorded
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths with more than one kind
    pub fn conflicts(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, stats)| stats.has_conflict())
            .map(|(path, _)| path)
    }

    /// Render the Markdown report
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("# Schema Report\n\n## Key Paths\n\n");
        for (path, stats) in self.iter() {
            let conflict = if stats.has_conflict() {
                " (type conflict)"
            } else {
                ""
            };
            let kinds: Vec<_> = stats.kinds.iter().map(|k| k.as_str()).collect();

            let _ = writeln!(out, "- `{path}`{conflict}");
            let _ = writeln!(out, "  - Types: {}", kinds.join(", "));
            out.push_str("  - Files:\n");
            for file in &stats.files {
                let _ = writeln!(out, "    - {file}");
            }
        }
        out
    }
}
