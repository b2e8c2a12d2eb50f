//! Native file dialogs (rfd) and modal notices.

use std::path::PathBuf;

use eframe::egui;

use crate::error::{Error, Result};
use crate::mesh::{is_gmsh_executable, GEOMETRY_EXTENSIONS, GMSH_EXECUTABLE};

/// Ask for the project directory.
pub fn pick_project_dir() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Choose project directory")
        .pick_folder()
}

/// Ask for the Gmsh executable.
///
/// The picker can only filter by extension, so the chosen file name is
/// checked afterwards.
pub fn pick_gmsh() -> Result<Option<PathBuf>> {
    let dialog = rfd::FileDialog::new().set_title(format!("Choose {GMSH_EXECUTABLE}"));
    #[cfg(windows)]
    let dialog = dialog.add_filter(GMSH_EXECUTABLE, &["exe"]);
    match dialog.pick_file() {
        Some(path) if !is_gmsh_executable(&path) => Err(Error::missing_gmsh(GMSH_EXECUTABLE)),
        picked => Ok(picked),
    }
}

/// Ask for a geometry or mesh file, starting in the project directory.
pub fn pick_geometry(project_dir: &str) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Choose geometry/mesh file")
        .add_filter("Geometry/Mesh", GEOMETRY_EXTENSIONS);
    // GTK and the desktop portal turn "*" into "*.*", which hides files
    // without an extension; there the path can be typed instead.
    #[cfg(any(windows, target_os = "macos"))]
    {
        dialog = dialog.add_filter("All files", &["*"]);
    }
    if !project_dir.is_empty() {
        dialog = dialog.set_directory(project_dir);
    }
    dialog.pick_file()
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Information,
    Warning,
    Critical,
}

/// A message the user must acknowledge.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Information,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Missing input is a warning, anything else is critical.
    pub fn from_error(err: &Error) -> Self {
        let kind = if err.is_user_input() {
            NoticeKind::Warning
        } else {
            NoticeKind::Critical
        };
        Self {
            kind,
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }

    /// Draw the notice; returns true once acknowledged.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut acknowledged = false;
        egui::Window::new(self.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let color = match self.kind {
                    NoticeKind::Information => ui.visuals().text_color(),
                    NoticeKind::Warning => ui.visuals().warn_fg_color,
                    NoticeKind::Critical => ui.visuals().error_fg_color,
                };
                ui.colored_label(color, self.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        acknowledged
    }
}
