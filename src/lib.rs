//! # palace-shell
//!
//! Project setup shell for the Palace electromagnetics solver.
//!
//! ## Features
//!
//! - **Settings**: Project directory, Gmsh path, run mode and script template
//!   persisted to a flat `settings.json`
//! - **Meshing**: Launch Gmsh detached in the project directory
//! - **Run Scripts**: Generate `run_palace.sh` for MPI, Slurm or a custom command
//! - **Example Schema**: Infer a JSON Schema from the Palace example configs,
//!   write a key-path report and validate the examples against it
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use palace_shell::settings::{RunMode, SettingsManager};
//! use palace_shell::script::generate_script;
//!
//! fn main() -> palace_shell::Result<()> {
//!     let mut manager = SettingsManager::from_file("settings.json");
//!     manager.set_project_dir("/work/coaxial")?;
//!     manager.select_mode(RunMode::Slurm)?;
//!
//!     let settings = manager.settings();
//!     let generated = generate_script(&settings.project_dir, &settings.script_template)?;
//!     println!("wrote {}", generated.script_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐        ┌──────────────────────────────┐
//! │  CLI (clap) / GUI (egui) │        │  palace/examples/{antenna,   │
//! └────────────┬─────────────┘        │  coaxial,cpw}/**/*.json      │
//!              │                      └──────────────┬───────────────┘
//!   ┌──────────┼───────────┬────────┐                │
//! ┌─┴──────┐ ┌─┴─────┐ ┌───┴────┐ ┌─┴───────┐ ┌──────┴────────────────┐
//! │settings│ │ mesh  │ │ script │ │ project │ │ schema: merge → rules │
//! │ .json  │ │ gmsh  │ │ run_   │ │ open    │ │ → schema.json, report │
//! │        │ │       │ │ palace │ │ folder  │ │ → validate            │
//! └────────┘ └───────┘ └────────┘ └─────────┘ └───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Settings persistence
pub mod settings;

/// Run-script generation
pub mod script;

/// Gmsh launcher
pub mod mesh;

/// Project folder helpers
pub mod project;

/// Schema inference from example configurations
pub mod schema;

/// Command-line interface
pub mod cli;

/// Desktop window
#[cfg(feature = "gui")]
pub mod gui;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use settings::{RunMode, Settings, SettingsManager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
