//! Schema inference module
//!
//! Infers a JSON Schema (draft 2020-12 subset) from the Palace example
//! configurations and validates the examples against it.
//!
//! # Features
//!
//! - **Kind Inference**: Unions the observed kinds at every node
//! - **Shape Merging**: Unions object keys and array item shapes across files
//! - **Palace Rules**: Required sections and closed enums layered on top
//! - **Key-Path Report**: Markdown listing of every path, its kinds and files
//! - **Validation**: Checks instances against the emitted subset

mod artifacts;
mod inference;
mod loader;
mod report;
mod rules;
mod types;
mod validate;

pub use artifacts::{
    build_artifacts, schema_path, validate_examples, write_artifacts, ExampleValidation,
    WrittenArtifacts, REPORT_FILE_NAME, SCHEMA_DIR, SCHEMA_FILE_NAME,
};
pub use inference::{infer_schema, merge_value, SchemaInferrer};
pub use loader::{find_example_files, load_examples, Example, EXAMPLE_DIRS};
pub use report::{PathIndex, PathStats};
pub use rules::{apply_palace_rules, PROBLEM_TYPES, REQUIRED_SECTIONS, SWEEP_TYPES};
pub use types::{SchemaArtifacts, SchemaNode, ValueKind, SCHEMA_DIALECT, SCHEMA_TITLE};
pub use validate::{is_valid, validate, Violation};

#[cfg(test)]
mod tests;
