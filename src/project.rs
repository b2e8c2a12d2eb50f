//! Project folder helpers

use crate::error::{Error, Result};
use crate::mesh::reap;
use std::path::Path;
use std::process::{Command, Stdio};

/// Platform file manager used to reveal a folder
#[cfg(target_os = "windows")]
const FILE_MANAGER: &str = "explorer";
#[cfg(target_os = "macos")]
const FILE_MANAGER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const FILE_MANAGER: &str = "xdg-open";

/// Open the project directory in the platform file manager
pub fn open_project_folder(project_dir: &str) -> Result<()> {
    if project_dir.is_empty() {
        return Err(Error::MissingProjectDir);
    }

    let dir = Path::new(project_dir);
    if !dir.is_dir() {
        return Err(Error::Other(format!(
            "Project directory does not exist: {}",
            dir.display()
        )));
    }

    let child = Command::new(FILE_MANAGER)
        .arg(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::launch_failed(FILE_MANAGER, e.to_string()))?;
    reap(child, FILE_MANAGER);

    tracing::debug!("Opened {} with {FILE_MANAGER}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_project_dir() {
        assert!(matches!(
            open_project_folder(""),
            Err(Error::MissingProjectDir)
        ));
    }

    #[test]
    fn test_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = open_project_folder(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
