//! CLI module
//!
//! Command-line interface mirroring the shell's tabs.
//!
//! # Commands
//!
//! - `settings show|set` - Inspect or edit the stored settings
//! - `mesh` - Launch Gmsh in the project directory
//! - `script` - Generate run_palace.sh
//! - `open` - Open the project directory
//! - `schema infer|validate` - Example schema tooling

mod commands;
mod runner;

pub use commands::{Cli, Commands, ModeArg, OutputFormat, SchemaAction, SettingsAction};
pub use runner::Runner;
