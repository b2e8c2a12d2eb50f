//! Desktop window with Project, Meshing and Run tabs.

mod app;
mod dialogs;

pub use app::ShellApp;

use crate::settings::SettingsManager;

/// Open the window; blocks until it is closed.
pub fn run(manager: SettingsManager) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Palace Shell")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Palace Shell",
        native_options,
        Box::new(|cc| Ok(Box::new(ShellApp::new(cc, manager)))),
    )
}
