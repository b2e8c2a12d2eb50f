//! Settings module
//!
//! Persists the shell state (project directory, Gmsh path, run mode, script
//! template, geometry file) to a flat `settings.json`.
//!
//! # Overview
//!
//! - `Settings` - The record itself, with lenient parsing
//! - `RunMode` - MPI, Slurm or custom launch, each with a default template
//! - `SettingsManager` - File-backed persistence, saving on every change

mod manager;
mod types;

pub use manager::{
    default_settings_path, load_settings, save_settings, SettingsManager, SETTINGS_FILE_NAME,
};
pub use types::{RunMode, Settings};
