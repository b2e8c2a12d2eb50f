//! Main application: ShellApp implements eframe::App.

use eframe::egui;

use crate::error::Result;
use crate::gui::dialogs::{self, Notice};
use crate::mesh::{launch_gmsh, GMSH_EXECUTABLE};
use crate::project::open_project_folder;
use crate::script::generate_script;
use crate::settings::{RunMode, SettingsManager};

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Project,
    Meshing,
    Run,
}

/// The main application state.
pub struct ShellApp {
    /// Settings, saved on every edit.
    manager: SettingsManager,

    /// Active tab.
    tab: Tab,

    /// Line-edit buffers; the geometry buffer keeps untrimmed input.
    geometry_text: String,

    /// Pending modal message.
    notice: Option<Notice>,
}

impl ShellApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, manager: SettingsManager) -> Self {
        let geometry_text = manager.settings().geometry_file.clone();
        Self {
            manager,
            tab: Tab::Project,
            geometry_text,
            notice: None,
        }
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!("{e}");
            self.notice = Some(Notice::from_error(&e));
        }
    }

    // ---------- Project tab ----------

    fn project_tab(&mut self, ui: &mut egui::Ui) {
        ui.label("Project directory:");
        ui.horizontal(|ui| {
            let mut dir = self.manager.settings().project_dir.clone();
            if ui.text_edit_singleline(&mut dir).changed() {
                let result = self.manager.set_project_dir(dir);
                self.report(result);
            }
            if ui.button("Browse...").clicked() {
                if let Some(dir) = dialogs::pick_project_dir() {
                    let result = self.manager.set_project_dir(dir.display().to_string());
                    self.report(result);
                }
            }
        });
        ui.add_space(8.0);
        ui.label("Tip: this folder will contain config.json, mesh/, run_palace.sh, etc.");
    }

    // ---------- Meshing tab ----------

    fn meshing_tab(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Gmsh executable path ({GMSH_EXECUTABLE}):"));
        ui.horizontal(|ui| {
            let mut path = self.manager.settings().gmsh_path.clone();
            if ui.text_edit_singleline(&mut path).changed() {
                let result = self.manager.set_gmsh_path(path);
                self.report(result);
            }
            if ui.button("Browse...").clicked() {
                match dialogs::pick_gmsh() {
                    Ok(Some(path)) => {
                        let result = self.manager.set_gmsh_path(path.display().to_string());
                        self.report(result);
                    }
                    Ok(None) => {}
                    Err(e) => self.report(Err(e)),
                }
            }
        });

        ui.add_space(8.0);
        ui.label("Optional: open a geometry/mesh file in Gmsh");
        ui.horizontal(|ui| {
            if ui.text_edit_singleline(&mut self.geometry_text).changed() {
                let result = self.manager.set_geometry_file(&self.geometry_text);
                self.report(result);
            }
            if ui.button("Browse...").clicked() {
                if let Some(file) = dialogs::pick_geometry(&self.manager.settings().project_dir) {
                    self.geometry_text = file.display().to_string();
                    let result = self.manager.set_geometry_file(&self.geometry_text);
                    self.report(result);
                }
            }
        });

        ui.add_space(8.0);
        if ui.button("Launch Gmsh").clicked() {
            let result = launch_gmsh(self.manager.settings()).map(|_| ());
            self.report(result);
        }
    }

    // ---------- Run tab ----------

    fn run_tab(&mut self, ui: &mut egui::Ui) {
        ui.label("Script mode:");
        let current = self.manager.settings().run_mode;
        let mut selected = current;
        egui::ComboBox::from_id_salt("run_mode")
            .selected_text(current.label())
            .show_ui(ui, |ui| {
                for mode in RunMode::ALL {
                    ui.selectable_value(&mut selected, mode, mode.label());
                }
            });
        if selected != current {
            let result = self.manager.select_mode(selected);
            self.report(result);
        }

        ui.add_space(8.0);
        ui.label("Script template:");

        let mut template = self.manager.settings().script_template.clone();
        let editor_height = (ui.available_height() - 40.0).max(120.0);
        egui::ScrollArea::vertical()
            .max_height(editor_height)
            .show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::multiline(&mut template)
                        .code_editor()
                        .desired_width(f32::INFINITY)
                        .desired_rows(20),
                );
                if response.changed() {
                    let result = self.manager.set_script_template(template);
                    self.report(result);
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Generate Script").clicked() {
                self.generate();
            }
            if ui.button("Open Folder").clicked() {
                let result = open_project_folder(&self.manager.settings().project_dir);
                self.report(result);
            }
        });
    }

    fn generate(&mut self) {
        let settings = self.manager.settings();
        match generate_script(&settings.project_dir, &settings.script_template) {
            Ok(generated) => {
                let saved = self.manager.save();
                self.report(saved);
                self.notice = Some(Notice::info(
                    "Script generated",
                    format!(
                        "Generated {}\nConfig path: {}",
                        generated.script_path.display(),
                        generated.config_path.display()
                    ),
                ));
            }
            Err(e) => self.report(Err(e)),
        }
    }
}

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Modal notice blocks the rest of the window
        if let Some(notice) = &self.notice {
            if notice.show(ctx) {
                self.notice = None;
            }
        }
        let enabled = self.notice.is_none();

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.tab, Tab::Project, "Project");
                    ui.selectable_value(&mut self.tab, Tab::Meshing, "Meshing");
                    ui.selectable_value(&mut self.tab, Tab::Run, "Run");
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| match self.tab {
                Tab::Project => self.project_tab(ui),
                Tab::Meshing => self.meshing_tab(ui),
                Tab::Run => self.run_tab(ui),
            });
        });
    }
}
