//! Error types for palace-shell
//!
//! Every fallible operation in the crate returns `Result<T, Error>` where
//! Error is defined here. Malformed settings are deliberately absent: loading
//! falls back to defaults instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for palace-shell
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Missing project directory: please choose a project directory first")]
    MissingProjectDir,

    #[error("Missing Gmsh executable: please set a valid path to {expected}")]
    MissingGmsh { expected: String },

    #[error("Settings error: {message}")]
    Settings { message: String },

    // ============================================================================
    // Process Errors
    // ============================================================================
    #[error("Failed to launch {program}: {message}")]
    LaunchFailed { program: String, message: String },

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("No example JSON files found.")]
    NoExamples,

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Failed to parse JSON in {path}: {source}")]
    JsonFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a settings error
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Create a missing Gmsh error naming the expected executable
    pub fn missing_gmsh(expected: impl Into<String>) -> Self {
        Self::MissingGmsh {
            expected: expected.into(),
        }
    }

    /// Create a launch failure error
    pub fn launch_failed(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Short title for dialogs and log lines
    pub fn title(&self) -> &'static str {
        match self {
            Error::MissingProjectDir => "Missing project directory",
            Error::MissingGmsh { .. } => "Missing Gmsh executable",
            Error::LaunchFailed { .. } => "Failed to launch",
            Error::NoExamples => "No examples",
            Error::Settings { .. } => "Settings",
            Error::Schema { .. } | Error::JsonFile { .. } | Error::JsonParse(_) => "Schema",
            Error::Io(_) => "I/O error",
            Error::Other(_) | Error::Anyhow(_) => "Error",
        }
    }

    /// Whether the error comes from missing user input rather than a failure
    pub fn is_user_input(&self) -> bool {
        matches!(self, Error::MissingProjectDir | Error::MissingGmsh { .. })
    }
}

/// Result type alias for palace-shell
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
