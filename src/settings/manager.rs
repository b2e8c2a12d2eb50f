//! Settings manager implementation
//!
//! Provides file-based settings persistence with atomic writes.

use super::types::{RunMode, Settings};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File name used next to the executable
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings manager for persisting and loading settings
#[derive(Debug, Clone)]
pub struct SettingsManager {
    /// Path to the settings file
    path: PathBuf,
    /// Current settings (cached)
    settings: Settings,
    /// Whether to auto-save on every update
    auto_save: bool,
}

impl SettingsManager {
    /// Create a manager for the given path with default settings
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            settings: Settings::new(),
            auto_save: true,
        }
    }

    /// Create an in-memory manager (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            settings: Settings::new(),
            auto_save: false,
        }
    }

    /// Create a manager from a file, loading existing settings if present.
    ///
    /// A missing or malformed file yields defaults; this never fails.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let mut manager = Self::new(path);
        manager.settings = load_settings(&manager.path);
        manager
    }

    /// Open the settings file next to the running executable
    pub fn open_default() -> Result<Self> {
        Ok(Self::from_file(default_settings_path()?))
    }

    /// Save current settings to the backing file
    pub fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }
        save_settings(&self.path, &self.settings)
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace all settings at once
    pub fn replace(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.persist()
    }

    /// Set the project directory
    pub fn set_project_dir(&mut self, dir: impl Into<String>) -> Result<()> {
        self.settings.project_dir = dir.into();
        self.persist()
    }

    /// Set the Gmsh executable path
    pub fn set_gmsh_path(&mut self, path: impl Into<String>) -> Result<()> {
        self.settings.gmsh_path = path.into();
        self.persist()
    }

    /// Set the geometry file (stored trimmed)
    pub fn set_geometry_file(&mut self, file: &str) -> Result<()> {
        self.settings.geometry_file = file.trim().to_string();
        self.persist()
    }

    /// Switch launch mode; the template is reset to the mode's default
    pub fn select_mode(&mut self, mode: RunMode) -> Result<()> {
        self.settings.select_mode(mode);
        self.persist()
    }

    /// Set the script template body
    pub fn set_script_template(&mut self, template: impl Into<String>) -> Result<()> {
        self.settings.script_template = template.into();
        self.persist()
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    fn persist(&self) -> Result<()> {
        if self.auto_save {
            self.save()?;
        }
        Ok(())
    }
}

/// `settings.json` in the directory of the running executable
pub fn default_settings_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| Error::settings(format!("Failed to locate executable: {e}")))?;
    let dir = exe
        .parent()
        .ok_or_else(|| Error::settings("Executable has no parent directory"))?;
    Ok(dir.join(SETTINGS_FILE_NAME))
}

/// Load settings, falling back to defaults on a missing or malformed file
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Settings::new();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read settings file {}: {e}", path.display());
            return Settings::new();
        }
    };

    match Settings::from_json(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring malformed settings file {}: {e}", path.display());
            Settings::new()
        }
    }
}

/// Write the whole settings record, replacing any previous file
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let contents = settings
        .to_json_pretty()
        .map_err(|e| Error::settings(format!("Failed to serialize settings: {e}")))?;

    // Write to temp file first, then rename for atomicity
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &contents)
        .map_err(|e| Error::settings(format!("Failed to write settings file: {e}")))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| Error::settings(format!("Failed to rename settings file: {e}")))?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
