//! CLI commands and argument parsing

use crate::settings::RunMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Palace project shell: settings, Gmsh launcher and run-script generator
#[derive(Parser, Debug)]
#[command(name = "palace-shell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to settings.json next to the executable)
    #[arg(short, long, global = true, env = "PALACE_SHELL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Launch Gmsh in the project directory
    Mesh,

    /// Generate run_palace.sh in the project directory
    Script {
        /// Print the script instead of writing it
        #[arg(long)]
        print: bool,
    },

    /// Open the project directory in the file manager
    Open,

    /// Infer or check the example schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the current settings
    Show,

    /// Update one or more fields
    Set {
        /// Project directory (empty string clears it)
        #[arg(long)]
        project_dir: Option<String>,

        /// Gmsh executable (empty string clears it)
        #[arg(long)]
        gmsh_path: Option<String>,

        /// Geometry or mesh file opened in Gmsh (empty string clears it)
        #[arg(long)]
        geometry_file: Option<String>,

        /// Launch mode; resets the template to the mode's default
        #[arg(long)]
        mode: Option<ModeArg>,

        /// Read the script template from a file
        #[arg(long)]
        template_file: Option<PathBuf>,
    },
}

/// Schema subcommands
#[derive(Subcommand, Debug)]
pub enum SchemaAction {
    /// Regenerate schema/palace.examples.schema.json and schema/report.md
    Infer {
        /// Repository root containing palace/examples
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Validate every example against the generated schema
    Validate {
        /// Repository root containing palace/examples and schema/
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

/// Launch mode as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// mpiexec
    Mpi,
    /// srun + SBATCH
    Slurm,
    /// Free-form command
    Custom,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mpi => RunMode::Mpi,
            ModeArg::Slurm => RunMode::Slurm,
            ModeArg::Custom => RunMode::Custom,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
