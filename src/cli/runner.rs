//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SchemaAction, SettingsAction};
use crate::error::{Error, Result, ResultExt};
use crate::mesh::launch_gmsh;
use crate::project::open_project_folder;
use crate::schema::{validate_examples, write_artifacts};
use crate::script::{generate_script, render_script};
use crate::settings::{RunMode, SettingsManager};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Settings { action } => match action {
                SettingsAction::Show => self.show_settings(),
                SettingsAction::Set {
                    project_dir,
                    gmsh_path,
                    geometry_file,
                    mode,
                    template_file,
                } => self.set_settings(&SettingsUpdate {
                    project_dir: project_dir.as_deref(),
                    gmsh_path: gmsh_path.as_deref(),
                    geometry_file: geometry_file.as_deref(),
                    mode: mode.map(RunMode::from),
                    template_file: template_file.as_deref(),
                }),
            },
            Commands::Mesh => self.mesh(),
            Commands::Script { print } => self.script(*print),
            Commands::Open => self.open(),
            Commands::Schema { action } => match action {
                SchemaAction::Infer { root } => self.schema_infer(root),
                SchemaAction::Validate { root } => self.schema_validate(root),
            },
        }
    }

    /// Load the settings manager
    fn load_settings(&self) -> Result<SettingsManager> {
        match &self.cli.settings {
            Some(path) => Ok(SettingsManager::from_file(path)),
            None => SettingsManager::open_default(),
        }
    }

    /// Print the current settings
    fn show_settings(&self) -> Result<()> {
        let manager = self.load_settings()?;
        self.output_message(&json!({
            "type": "SETTINGS",
            "path": manager.path().display().to_string(),
            "settings": manager.settings(),
        }));
        Ok(())
    }

    /// Apply requested changes and save once
    fn set_settings(&self, update: &SettingsUpdate<'_>) -> Result<()> {
        let mut manager = self.load_settings()?;
        let mut settings = manager.settings().clone();

        if let Some(dir) = update.project_dir {
            settings.project_dir = absolute(dir)?;
        }
        if let Some(path) = update.gmsh_path {
            settings.gmsh_path = absolute(path)?;
        }
        if let Some(file) = update.geometry_file {
            settings.geometry_file = file.trim().to_string();
        }
        // Mode before template: selecting a mode resets the template
        if let Some(mode) = update.mode {
            settings.select_mode(mode);
        }
        if let Some(path) = update.template_file {
            settings.script_template = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template file {}", path.display()))?;
        }

        manager.replace(settings)?;
        tracing::info!("Updated settings at {}", manager.path().display());

        self.output_message(&json!({
            "type": "SETTINGS",
            "path": manager.path().display().to_string(),
            "settings": manager.settings(),
        }));
        Ok(())
    }

    /// Launch Gmsh
    fn mesh(&self) -> Result<()> {
        let manager = self.load_settings()?;
        let pid = launch_gmsh(manager.settings())?;

        self.output_message(&json!({
            "type": "LAUNCH",
            "program": manager.settings().gmsh_path,
            "pid": pid,
        }));
        Ok(())
    }

    /// Generate (or print) the run script
    fn script(&self, print: bool) -> Result<()> {
        let manager = self.load_settings()?;
        let settings = manager.settings();

        if print {
            if !settings.has_project_dir() {
                return Err(Error::MissingProjectDir);
            }
            print!(
                "{}",
                render_script(&settings.project_dir, &settings.script_template)
            );
            return Ok(());
        }

        let generated = generate_script(&settings.project_dir, &settings.script_template)?;
        // Persist the template that produced the script
        manager.save()?;

        self.output_message(&json!({
            "type": "SCRIPT",
            "mode": settings.run_mode.label(),
            "script": generated.script_path.display().to_string(),
            "config": generated.config_path.display().to_string(),
        }));
        Ok(())
    }

    /// Open the project folder
    fn open(&self) -> Result<()> {
        let manager = self.load_settings()?;
        open_project_folder(&manager.settings().project_dir)
    }

    /// Regenerate the schema artifacts
    fn schema_infer(&self, root: &Path) -> Result<()> {
        let written = write_artifacts(root)?;

        self.output_message(&json!({
            "type": "SCHEMA",
            "examples": written.example_count,
            "schema": written.schema_path.display().to_string(),
            "report": written.report_path.display().to_string(),
        }));
        Ok(())
    }

    /// Validate every example, failing if any is invalid
    fn schema_validate(&self, root: &Path) -> Result<()> {
        let results = validate_examples(root)?;
        let mut failed = 0usize;

        for result in &results {
            let errors: Vec<Value> = result
                .violations
                .iter()
                .map(|v| json!(v.to_string()))
                .collect();
            if !errors.is_empty() {
                failed += 1;
            }
            self.output_message(&json!({
                "type": "VALIDATION",
                "file": result.file,
                "valid": errors.is_empty(),
                "errors": errors,
            }));
        }

        if failed > 0 {
            return Err(Error::schema(format!(
                "{failed} of {} examples do not match the schema",
                results.len()
            )));
        }
        Ok(())
    }

    /// Print a message in the selected format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Field changes requested by `settings set`
struct SettingsUpdate<'a> {
    project_dir: Option<&'a str>,
    gmsh_path: Option<&'a str>,
    geometry_file: Option<&'a str>,
    mode: Option<RunMode>,
    template_file: Option<&'a Path>,
}

/// Absolute form of a user-supplied path, as a file dialog would return it.
///
/// An empty argument clears the setting.
fn absolute(path: &str) -> Result<String> {
    if path.is_empty() {
        return Ok(String::new());
    }
    let path = Path::new(path);
    let path: PathBuf = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::load_settings;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    fn run_with(settings: &Path, args: &[&str]) -> Result<()> {
        let settings = settings.display().to_string();
        let mut argv = vec!["palace-shell", "--settings", settings.as_str(), "-f", "json"];
        argv.extend_from_slice(args);
        Runner::new(Cli::parse_from(argv)).run()
    }

    fn workspace() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        (dir, settings)
    }

    #[test]
    fn test_set_mode_then_template_file() {
        let (dir, settings) = workspace();
        let template = dir.path().join("job.sh");
        fs::write(&template, "srun -n 64 palace -c \"$CONFIG\"").unwrap();

        run_with(
            &settings,
            &[
                "settings",
                "set",
                "--mode",
                "slurm",
                "--template-file",
                template.to_str().unwrap(),
            ],
        )
        .unwrap();

        let stored = load_settings(&settings);
        assert_eq!(stored.run_mode, RunMode::Slurm);
        assert_eq!(stored.script_template, "srun -n 64 palace -c \"$CONFIG\"");
    }

    #[test]
    fn test_set_mode_alone_resets_template() {
        let (_dir, settings) = workspace();
        run_with(&settings, &["settings", "set", "--mode", "custom"]).unwrap();

        let stored = load_settings(&settings);
        assert_eq!(stored.run_mode, RunMode::Custom);
        assert_eq!(stored.script_template, RunMode::Custom.default_template());
    }

    #[test]
    fn test_set_missing_template_file() {
        let (dir, settings) = workspace();
        let missing = dir.path().join("absent.sh");

        let err = run_with(
            &settings,
            &["settings", "set", "--template-file", missing.to_str().unwrap()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read template file"));
        assert!(!settings.exists());
    }

    #[test]
    fn test_relative_paths_become_absolute() {
        let (_dir, settings) = workspace();
        run_with(
            &settings,
            &["settings", "set", "--project-dir", "cpw", "--gmsh-path", "bin/gmsh"],
        )
        .unwrap();

        let cwd = std::env::current_dir().unwrap();
        let stored = load_settings(&settings);
        assert_eq!(stored.project_dir, cwd.join("cpw").display().to_string());
        assert_eq!(stored.gmsh_path, cwd.join("bin/gmsh").display().to_string());
    }

    #[test]
    fn test_empty_path_clears_setting() {
        let (_dir, settings) = workspace();
        run_with(&settings, &["settings", "set", "--project-dir", "/work/cpw"]).unwrap();
        run_with(&settings, &["settings", "set", "--project-dir", ""]).unwrap();

        assert_eq!(load_settings(&settings).project_dir, "");
    }

    #[test]
    fn test_script_print_requires_project_dir() {
        let (_dir, settings) = workspace();
        let err = run_with(&settings, &["script", "--print"]).unwrap_err();
        assert!(matches!(err, Error::MissingProjectDir));
    }

    #[test]
    fn test_script_writes_into_project_dir() {
        let (dir, settings) = workspace();
        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();

        run_with(
            &settings,
            &["settings", "set", "--project-dir", project.to_str().unwrap()],
        )
        .unwrap();
        run_with(&settings, &["script"]).unwrap();

        let script = fs::read_to_string(project.join("run_palace.sh")).unwrap();
        assert!(script.contains("mpiexec -n 4 palace"));
    }

    #[test]
    fn test_schema_validate_fails_on_drift() {
        let (dir, settings) = workspace();
        let examples = dir.path().join("palace/examples/cpw");
        fs::create_dir_all(&examples).unwrap();
        fs::write(
            examples.join("cpw.json"),
            r#"{"Problem": {"Type": "Driven"}, "Model": {}, "Domains": {}, "Boundaries": {}, "Solver": {}}"#,
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();

        run_with(&settings, &["schema", "infer", "--root", root]).unwrap();
        run_with(&settings, &["schema", "validate", "--root", root]).unwrap();

        fs::write(examples.join("eigen.json"), r#"{"Problem": {"Type": "Eigenmode"}}"#).unwrap();
        let err = run_with(&settings, &["schema", "validate", "--root", root]).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
        assert_eq!(
            err.to_string(),
            "Schema error: 1 of 2 examples do not match the schema"
        );
    }
}
