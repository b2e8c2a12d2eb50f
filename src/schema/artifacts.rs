//! Building and writing the schema artifacts

use super::inference::SchemaInferrer;
use super::loader::load_examples;
use super::rules::apply_palace_rules;
use super::types::SchemaArtifacts;
use super::validate::{validate, Violation};
use crate::error::{Error, Result, ResultExt};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Output directory under the repository root
pub const SCHEMA_DIR: &str = "schema";

/// Schema document file name
pub const SCHEMA_FILE_NAME: &str = "palace.examples.schema.json";

/// Report file name
pub const REPORT_FILE_NAME: &str = "report.md";

/// Locations of the written artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    /// Schema document
    pub schema_path: PathBuf,
    /// Markdown report
    pub report_path: PathBuf,
    /// Number of example files merged
    pub example_count: usize,
}

/// Validation outcome for one example file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleValidation {
    /// Repository-relative example path
    pub file: String,
    /// Violations found (empty when valid)
    pub violations: Vec<Violation>,
}

/// Path of the schema document under `root`
pub fn schema_path(root: &Path) -> PathBuf {
    root.join(SCHEMA_DIR).join(SCHEMA_FILE_NAME)
}

/// Infer the schema and report from the examples under `root`
pub fn build_artifacts(root: &Path) -> Result<SchemaArtifacts> {
    let examples = load_examples(root)?;

    let mut inferrer = SchemaInferrer::new();
    for example in &examples {
        inferrer.add_example(&example.relative, &example.value);
    }
    tracing::info!(
        "Merged {} example files into {} key paths",
        inferrer.example_count(),
        inferrer.paths().len()
    );

    Ok(inferrer.finish(apply_palace_rules))
}

/// Regenerate `schema/palace.examples.schema.json` and `schema/report.md`
pub fn write_artifacts(root: &Path) -> Result<WrittenArtifacts> {
    let artifacts = build_artifacts(root)?;

    let dir = root.join(SCHEMA_DIR);
    std::fs::create_dir_all(&dir)?;

    let schema_path = dir.join(SCHEMA_FILE_NAME);
    std::fs::write(&schema_path, artifacts.schema_text())?;

    let report_path = dir.join(REPORT_FILE_NAME);
    std::fs::write(&report_path, &artifacts.report)?;

    tracing::info!("Wrote {} and {}", schema_path.display(), report_path.display());
    Ok(WrittenArtifacts {
        schema_path,
        report_path,
        example_count: artifacts.example_count,
    })
}

/// Validate every example under `root` against the written schema document
pub fn validate_examples(root: &Path) -> Result<Vec<ExampleValidation>> {
    let path = schema_path(root);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} (run `schema infer` first)", path.display()))?;
    let schema: Value = serde_json::from_str(&contents).map_err(|source| Error::JsonFile {
        path: path.clone(),
        source,
    })?;

    let results = load_examples(root)?
        .into_iter()
        .map(|example| ExampleValidation {
            violations: validate(&schema, &example.value),
            file: example.relative,
        })
        .collect();
    Ok(results)
}
