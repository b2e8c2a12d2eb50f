//! Run-script generation
//!
//! Builds `run_palace.sh`: a fixed bash preamble that resolves the project
//! directory and exports `CONFIG`, followed by the user's template body.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the generated script inside the project directory
pub const SCRIPT_FILE_NAME: &str = "run_palace.sh";

/// Solver configuration expected inside the project directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Paths produced by a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Written script
    pub script_path: PathBuf,
    /// Config file the script points `CONFIG` at
    pub config_path: PathBuf,
}

/// Render the full script for a project directory and template body
pub fn render_script(project_dir: &str, template: &str) -> String {
    let project_line = format!("PROJECT_DIR=\"{}\"", posix_path(project_dir));
    [
        "#!/usr/bin/env bash",
        "set -e",
        "SCRIPT_DIR=\"$(cd \"$(dirname \"$0\")\" && pwd)\"",
        "cd \"$SCRIPT_DIR\"",
        project_line.as_str(),
        "CONFIG=\"$PROJECT_DIR/config.json\"",
        "cd \"$PROJECT_DIR\"",
        "",
        template.trim(),
        "",
    ]
    .join("\n")
}

/// Write `run_palace.sh` into the project directory and make it executable
pub fn generate_script(project_dir: &str, template: &str) -> Result<GeneratedScript> {
    if project_dir.is_empty() {
        return Err(Error::MissingProjectDir);
    }

    let dir = Path::new(project_dir);
    let script_path = dir.join(SCRIPT_FILE_NAME);
    let config_path = dir.join(CONFIG_FILE_NAME);

    std::fs::write(&script_path, render_script(project_dir, template))?;
    make_executable(&script_path)?;

    tracing::info!("Generated {}", script_path.display());
    Ok(GeneratedScript {
        script_path,
        config_path,
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Forward-slash form of a path, without trailing separators
fn posix_path(path: &str) -> String {
    let converted = path.replace('\\', "/");
    let trimmed = converted.trim_end_matches('/');
    if trimmed.is_empty() && !converted.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
