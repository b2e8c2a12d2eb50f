//! Gmsh launcher
//!
//! Starts Gmsh as a detached process in the project directory, optionally
//! opening a geometry or mesh file. Its output is discarded and its exit
//! status is only collected to release the process entry.

use crate::error::{Error, Result};
use crate::settings::Settings;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Executable name shown in pickers and error messages
#[cfg(windows)]
pub const GMSH_EXECUTABLE: &str = "gmsh.exe";
/// Executable name shown in pickers and error messages
#[cfg(not(windows))]
pub const GMSH_EXECUTABLE: &str = "gmsh";

/// Extensions offered by the geometry/mesh file picker
pub const GEOMETRY_EXTENSIONS: &[&str] = &["geo", "geo_unrolled", "step", "stp", "stl", "brep", "msh"];

/// Whether `path` names the Gmsh executable (case-insensitive on Windows)
pub fn is_gmsh_executable(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if cfg!(windows) {
        name.eq_ignore_ascii_case(GMSH_EXECUTABLE)
    } else {
        name == GMSH_EXECUTABLE
    }
}

/// A validated Gmsh invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmshLaunch {
    /// Gmsh executable
    pub program: PathBuf,
    /// Command-line arguments (the geometry file, if any)
    pub args: Vec<String>,
    /// Working directory
    pub working_dir: PathBuf,
}

impl GmshLaunch {
    /// Validate settings and build the invocation.
    ///
    /// The project directory is checked first, then the Gmsh path, which
    /// must point at an existing file.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if !settings.has_project_dir() {
            return Err(Error::MissingProjectDir);
        }
        if settings.gmsh_path.is_empty() || !Path::new(&settings.gmsh_path).exists() {
            return Err(Error::missing_gmsh(GMSH_EXECUTABLE));
        }

        Ok(Self {
            program: PathBuf::from(&settings.gmsh_path),
            args: settings.geometry().map(str::to_string).into_iter().collect(),
            working_dir: PathBuf::from(&settings.project_dir),
        })
    }

    /// Spawn the process detached and return its pid
    pub fn spawn(&self) -> Result<u32> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut command);

        let child = command.spawn().map_err(|e| {
            Error::launch_failed(
                self.program.display().to_string(),
                format!("{e}. Check path and permissions."),
            )
        })?;

        let pid = child.id();
        tracing::info!(
            "Launched {} (pid {pid}) in {}",
            self.program.display(),
            self.working_dir.display()
        );
        reap(child, "gmsh");
        Ok(pid)
    }
}

/// Validate settings and launch Gmsh
pub fn launch_gmsh(settings: &Settings) -> Result<u32> {
    GmshLaunch::from_settings(settings)?.spawn()
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    // Own process group, so terminal signals aimed at us do not reach Gmsh
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    command.creation_flags(DETACHED_PROCESS);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

/// Collect the exit status off-thread so no zombie outlives the child
pub(crate) fn reap(mut child: std::process::Child, program: &str) {
    let program = program.to_string();
    std::thread::spawn(move || {
        if let Ok(status) = child.wait() {
            tracing::debug!("{program} exited with {status}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_with(project_dir: &str, gmsh_path: &str, geometry: &str) -> Settings {
        Settings {
            project_dir: project_dir.to_string(),
            gmsh_path: gmsh_path.to_string(),
            geometry_file: geometry.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_project_dir_checked_first() {
        let settings = settings_with("", "", "");
        let err = GmshLaunch::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::MissingProjectDir));
    }

    #[test]
    fn test_missing_gmsh_path() {
        let dir = tempdir().unwrap();
        let settings = settings_with(dir.path().to_str().unwrap(), "", "");
        let err = GmshLaunch::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::MissingGmsh { .. }));
    }

    #[test]
    fn test_nonexistent_gmsh_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-gmsh");
        let settings = settings_with(
            dir.path().to_str().unwrap(),
            missing.to_str().unwrap(),
            "",
        );
        let err = GmshLaunch::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::MissingGmsh { .. }));
    }

    #[test]
    fn test_geometry_argument() {
        let dir = tempdir().unwrap();
        let gmsh = dir.path().join("gmsh");
        std::fs::write(&gmsh, "").unwrap();
        let project = dir.path().to_str().unwrap();

        let launch =
            GmshLaunch::from_settings(&settings_with(project, gmsh.to_str().unwrap(), "  coax.geo "))
                .unwrap();
        assert_eq!(launch.args, vec!["coax.geo".to_string()]);
        assert_eq!(launch.working_dir, dir.path());

        let launch =
            GmshLaunch::from_settings(&settings_with(project, gmsh.to_str().unwrap(), "   "))
                .unwrap();
        assert!(launch.args.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_failure_is_reported() {
        let dir = tempdir().unwrap();
        // Exists but is not executable
        let gmsh = dir.path().join("gmsh");
        std::fs::write(&gmsh, "").unwrap();

        let launch = GmshLaunch {
            program: gmsh,
            args: Vec::new(),
            working_dir: dir.path().to_path_buf(),
        };
        let err = launch.spawn().unwrap_err();
        assert!(matches!(err, Error::LaunchFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached() {
        let dir = tempdir().unwrap();
        let launch = GmshLaunch {
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".to_string(), "exit 0".to_string()],
            working_dir: dir.path().to_path_buf(),
        };
        assert!(launch.spawn().unwrap() > 0);
    }

    #[test]
    fn test_is_gmsh_executable() {
        let dir = Path::new("/opt/gmsh/bin");
        assert!(is_gmsh_executable(&dir.join(GMSH_EXECUTABLE)));
        assert!(!is_gmsh_executable(&dir.join("paraview.exe")));
        assert!(!is_gmsh_executable(&dir.join("gmsh-wrapper")));
        assert!(!is_gmsh_executable(dir.join("..").as_path()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_reaped_child_leaves_no_zombie() {
        let child = Command::new("/bin/sh")
            .args(["-c", "exit 0"])
            .spawn()
            .unwrap();
        let proc_entry = PathBuf::from(format!("/proc/{}", child.id()));
        reap(child, "sh");

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while proc_entry.exists() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(!proc_entry.exists());
    }
}
