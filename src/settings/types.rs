//! Settings types
//!
//! The record is serialized as a flat JSON object and overwritten wholesale
//! on every change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the generated script launches Palace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunMode {
    /// Local MPI launch via `mpiexec`
    #[default]
    #[serde(rename = "MPI (mpiexec)")]
    Mpi,
    /// Slurm batch job via `srun` and `#SBATCH` directives
    #[serde(rename = "Slurm (srun + SBATCH)")]
    Slurm,
    /// Free-form user command
    #[serde(rename = "Custom")]
    Custom,
}

impl RunMode {
    /// All modes in menu order
    pub const ALL: [RunMode; 3] = [RunMode::Mpi, RunMode::Slurm, RunMode::Custom];

    /// Label shown in menus and stored in `settings.json`
    pub fn label(self) -> &'static str {
        match self {
            RunMode::Mpi => "MPI (mpiexec)",
            RunMode::Slurm => "Slurm (srun + SBATCH)",
            RunMode::Custom => "Custom",
        }
    }

    /// Parse a stored label
    pub fn from_label(label: &str) -> Option<RunMode> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }

    /// Template body the editor is reset to when this mode is selected
    pub fn default_template(self) -> String {
        match self {
            RunMode::Mpi => ["# Run with MPI", "mpiexec -n 4 palace -c \"$CONFIG\""].join("\n"),
            RunMode::Slurm => [
                "#SBATCH --job-name=palace",
                "#SBATCH --nodes=1",
                "#SBATCH --ntasks=4",
                "#SBATCH --time=01:00:00",
                "",
                "srun palace -c \"$CONFIG\"",
            ]
            .join("\n"),
            RunMode::Custom => "# Write your custom command here".to_string(),
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Persisted shell settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Project directory ("" when unset)
    pub project_dir: String,
    /// Path to the Gmsh executable ("" when unset)
    pub gmsh_path: String,
    /// Selected launch mode
    pub run_mode: RunMode,
    /// Script body appended after the fixed preamble
    pub script_template: String,
    /// Geometry or mesh file handed to Gmsh ("" when unset)
    pub geometry_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_dir: String::new(),
            gmsh_path: String::new(),
            run_mode: RunMode::Mpi,
            script_template: RunMode::Mpi.default_template(),
            geometry_file: String::new(),
        }
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch launch mode, resetting the template to the mode's default
    pub fn select_mode(&mut self, mode: RunMode) {
        self.run_mode = mode;
        self.script_template = mode.default_template();
    }

    /// Trimmed geometry file, if one is set
    pub fn geometry(&self) -> Option<&str> {
        let trimmed = self.geometry_file.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Whether a project directory has been chosen
    pub fn has_project_dir(&self) -> bool {
        !self.project_dir.is_empty()
    }

    /// Parse settings leniently.
    ///
    /// Each key is read on its own: a missing or mistyped value takes its
    /// default without discarding the other keys. Only a document that is not
    /// a JSON object is an error.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let stored: Map<String, Value> = serde_json::from_str(json)?;
        let text = |key: &str| stored.get(key).and_then(Value::as_str);

        let run_mode = text("run_mode")
            .and_then(RunMode::from_label)
            .unwrap_or_default();

        // An empty saved template keeps the mode's default body
        let script_template = text("script_template")
            .filter(|t| !t.is_empty())
            .map_or_else(|| run_mode.default_template(), str::to_string);

        Ok(Self {
            project_dir: text("project_dir").unwrap_or_default().to_string(),
            gmsh_path: text("gmsh_path").unwrap_or_default().to_string(),
            run_mode,
            script_template,
            geometry_file: text("geometry_file").unwrap_or_default().trim().to_string(),
        })
    }

    /// Serialize as the on-disk document
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
