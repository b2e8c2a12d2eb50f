//! Example discovery and loading

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Example directories scanned, relative to the repository root
pub const EXAMPLE_DIRS: [&str; 3] = [
    "palace/examples/antenna",
    "palace/examples/coaxial",
    "palace/examples/cpw",
];

/// One parsed example file
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the repository root, forward slashes
    pub relative: String,
    /// Parsed contents
    pub value: Value,
}

/// Every `*.json` below the example directories, in sorted order.
///
/// Directories that do not exist are skipped.
pub fn find_example_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in EXAMPLE_DIRS {
        let dir = root.join(dir);
        if !dir.is_dir() {
            tracing::debug!("Skipping missing example directory {}", dir.display());
            continue;
        }
        collect_json_files(&dir, &mut files)?;
    }
    Ok(files)
}

/// Load and parse every example; fails if none exist
pub fn load_examples(root: &Path) -> Result<Vec<Example>> {
    let files = find_example_files(root)?;
    if files.is_empty() {
        return Err(Error::NoExamples);
    }

    files
        .into_iter()
        .map(|path| -> Result<Example> {
            let contents = std::fs::read_to_string(&path)?;
            let value = serde_json::from_str(&contents).map_err(|source| Error::JsonFile {
                path: path.clone(),
                source,
            })?;
            let relative = relative_posix(root, &path);
            Ok(Example {
                path,
                relative,
                value,
            })
        })
        .collect()
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        entries.push((entry.path(), entry.file_type()?));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        if file_type.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
            files.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            // Linked directories are not descended into
            tracing::debug!("Skipping linked directory {}", path.display());
        }
    }
    Ok(())
}

fn relative_posix(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
