//! palace-shell desktop window

#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

use palace_shell::settings::SettingsManager;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let manager = match std::env::var_os("PALACE_SHELL_SETTINGS") {
        Some(path) => SettingsManager::from_file(path),
        None => SettingsManager::open_default().unwrap_or_else(|e| {
            tracing::warn!("{e}; settings will not be saved");
            SettingsManager::in_memory()
        }),
    };

    palace_shell::gui::run(manager)
}
