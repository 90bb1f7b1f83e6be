use egui::{Color32, RichText};

use super::HealthTimelineApp;
use crate::services::backup::{BackupInfo, BackupService};
use crate::services::entry::EntryService;
use crate::services::report;
use crate::services::storage::default_export_file_name;

const IMPORT_ERROR: &str = "Invalid JSON format. Please check your data.";

/// Open/closed flags and scratch text for the secondary windows.
#[derive(Debug, Default)]
pub(super) struct WindowState {
    pub show_export: bool,
    pub export_as_text: bool,
    pub show_import: bool,
    pub import_text: String,
    pub import_error: Option<String>,
    pub show_clear_confirm: bool,
    pub show_help: bool,
    pub show_backups: bool,
    pub backups: Vec<BackupInfo>,
    /// Row awaiting restore confirmation
    pub confirm_restore: Option<usize>,
}

impl WindowState {
    pub fn open_export(&mut self) {
        self.show_export = true;
        self.export_as_text = false;
    }

    pub fn open_import(&mut self) {
        self.show_import = true;
        self.import_text.clear();
        self.import_error = None;
    }

    pub fn any_open(&self) -> bool {
        self.show_export
            || self.show_import
            || self.show_clear_confirm
            || self.show_help
            || self.show_backups
    }
}

/// Export, import, clear-confirmation, help and backup windows.
impl HealthTimelineApp {
    pub(super) fn render_windows(&mut self, ctx: &egui::Context) {
        self.render_export_window(ctx);
        self.render_import_window(ctx);
        self.render_clear_confirm(ctx);
        self.render_help_window(ctx);
        self.render_backups_window(ctx);
    }

    pub(super) fn open_backups(&mut self) {
        self.windows.show_backups = true;
        self.windows.confirm_restore = None;
        self.refresh_backups();
    }

    fn backup_dir(&self) -> std::path::PathBuf {
        BackupService::backup_dir_for(self.entries.storage().path())
    }

    fn refresh_backups(&mut self) {
        self.windows.backups = match BackupService::list_backups(&self.backup_dir()) {
            Ok(backups) => backups,
            Err(e) => {
                log::warn!("Failed to list backups: {:#}", e);
                Vec::new()
            }
        };
    }

    fn render_backups_window(&mut self, ctx: &egui::Context) {
        if !self.windows.show_backups {
            return;
        }

        let location = self.backup_dir().display().to_string();
        let mut open = true;
        let mut create_requested = false;
        let mut restore_index = None;

        egui::Window::new("Backups")
            .open(&mut open)
            .collapsible(false)
            .default_width(520.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Location:").strong());
                    ui.label(location);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("➕ Create Backup").clicked() {
                            create_requested = true;
                        }
                    });
                });
                ui.separator();

                if self.windows.backups.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(RichText::new("No backups found").color(self.theme.text_secondary));
                        ui.add_space(20.0);
                    });
                    return;
                }

                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        for (index, backup) in self.windows.backups.iter().enumerate() {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(RichText::new(&backup.filename).strong());
                                    ui.label(
                                        RichText::new(format!(
                                            "{}  ·  {}",
                                            backup.modified_at.format("%Y-%m-%d %H:%M:%S"),
                                            BackupService::format_size(backup.size_bytes)
                                        ))
                                        .color(self.theme.text_secondary),
                                    );
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if self.windows.confirm_restore == Some(index) {
                                            if ui.button("Cancel").clicked() {
                                                self.windows.confirm_restore = None;
                                            }
                                            let confirm = RichText::new("Confirm Restore")
                                                .color(Color32::RED);
                                            if ui.button(confirm).clicked() {
                                                restore_index = Some(index);
                                            }
                                        } else if ui.button("↩ Restore").clicked() {
                                            self.windows.confirm_restore = Some(index);
                                        }
                                    },
                                );
                            });
                            ui.separator();
                        }
                    });
            });

        if create_requested {
            match BackupService::create_backup(self.entries.storage().path(), &self.backup_dir()) {
                Ok(_) => self.toasts.success("Backup created"),
                Err(e) => {
                    log::error!("Failed to create backup: {:#}", e);
                    self.toasts.error(format!("Backup failed: {}", e));
                }
            }
            self.refresh_backups();
        }
        if let Some(index) = restore_index {
            self.restore_backup(index);
        }
        if !open {
            self.windows.show_backups = false;
        }
    }

    fn restore_backup(&mut self, index: usize) {
        let Some(backup) = self.windows.backups.get(index).cloned() else {
            return;
        };
        let storage = self.entries.storage().clone();

        match BackupService::restore_backup(&backup.path, storage.path()) {
            Ok(()) => {
                self.entries = EntryService::load(storage);
                self.toasts.success(format!("Restored {}", backup.filename));
                self.center_on_today = true;
            }
            Err(e) => {
                log::error!("Restore failed: {:#}", e);
                self.toasts.error(format!("Restore failed: {}", e));
            }
        }
        self.windows.confirm_restore = None;
        self.refresh_backups();
    }

    fn export_content(&self) -> String {
        if self.windows.export_as_text {
            return report::export_text(self.entries.data(), self.today);
        }
        match self.entries.export_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize health data: {}", e);
                String::new()
            }
        }
    }

    fn render_export_window(&mut self, ctx: &egui::Context) {
        if !self.windows.show_export {
            return;
        }

        let mut content = self.export_content();
        let mut open = true;
        let mut copied = false;
        let mut save_requested = false;

        egui::Window::new("Export Data")
            .open(&mut open)
            .collapsible(false)
            .default_width(560.0)
            .default_height(480.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let hint = if self.windows.export_as_text {
                        "Readable text format for pasting into other tools."
                    } else {
                        "JSON format for backup and analysis."
                    };
                    ui.label(RichText::new(hint).color(self.theme.text_secondary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.checkbox(&mut self.windows.export_as_text, "Text format");
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(360.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut content)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY)
                                .interactive(false),
                        );
                    });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let extension = if self.windows.export_as_text { "txt" } else { "json" };
                    if ui.button(format!("💾 Save .{}", extension)).clicked() {
                        save_requested = true;
                    }
                    if ui.button("📋 Copy to Clipboard").clicked() {
                        ui.output_mut(|o| o.copied_text = content.clone());
                        copied = true;
                    }
                });
            });

        if copied {
            self.toasts.success("Copied to clipboard");
        }
        if save_requested {
            self.save_export(&content);
        }
        if !open {
            self.windows.show_export = false;
        }
    }

    fn save_export(&mut self, content: &str) {
        let (extension, filter) = if self.windows.export_as_text {
            ("txt", "Text")
        } else {
            ("json", "JSON")
        };

        let Some(path) = rfd::FileDialog::new()
            .set_title("Export Health Data")
            .set_file_name(default_export_file_name(self.today, extension))
            .add_filter(filter, &[extension])
            .save_file()
        else {
            return;
        };

        match std::fs::write(&path, content) {
            Ok(()) => {
                log::info!("Exported health data to {:?}", path);
                self.toasts.success("Export saved");
            }
            Err(e) => {
                log::error!("Failed to write export to {:?}: {}", path, e);
                self.toasts.error(format!("Export failed: {}", e));
            }
        }
    }

    fn render_import_window(&mut self, ctx: &egui::Context) {
        if !self.windows.show_import {
            return;
        }

        let mut open = true;
        let mut import_requested = false;
        let mut cancelled = false;

        egui::Window::new("Import Data")
            .open(&mut open)
            .collapsible(false)
            .default_width(520.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(
                        "Paste JSON data or open a file to restore your health timeline.\n\
                         This will replace all existing data.",
                    )
                    .color(self.theme.text_secondary),
                );
                ui.add_space(4.0);

                if ui.button("📂 Open JSON File...").clicked() {
                    self.load_import_file();
                }

                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        let edit = ui.add(
                            egui::TextEdit::multiline(&mut self.windows.import_text)
                                .font(egui::TextStyle::Monospace)
                                .desired_rows(10)
                                .desired_width(f32::INFINITY)
                                .hint_text("Paste JSON here..."),
                        );
                        if edit.changed() {
                            self.windows.import_error = None;
                        }
                    });

                if let Some(error) = &self.windows.import_error {
                    ui.colored_label(Color32::RED, error);
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let can_import = !self.windows.import_text.trim().is_empty();
                        if ui.add_enabled(can_import, egui::Button::new("Import")).clicked() {
                            import_requested = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancelled = true;
                        }
                    });
                });
            });

        if import_requested {
            match self.entries.import_json(&self.windows.import_text) {
                Ok(count) => {
                    self.toasts.success(format!("Imported {} entries", count));
                    self.windows.show_import = false;
                    self.center_on_today = true;
                }
                Err(e) => {
                    log::warn!("Import rejected: {}", e);
                    self.windows.import_error = Some(IMPORT_ERROR.to_string());
                }
            }
        }
        if !open || cancelled {
            self.windows.show_import = false;
        }
    }

    fn load_import_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Import Health Data")
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                self.windows.import_text = text;
                self.windows.import_error = None;
            }
            Err(e) => {
                log::warn!("Failed to read import file {:?}: {}", path, e);
                self.windows.import_error = Some(format!("Could not read file: {}", e));
            }
        }
    }

    fn render_clear_confirm(&mut self, ctx: &egui::Context) {
        if !self.windows.show_clear_confirm {
            return;
        }

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Clear All Data")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    "Are you sure you want to delete all your health data?\n\n\
                     This action cannot be undone.",
                );
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(RichText::new("Delete All").color(Color32::WHITE))
                            .fill(Color32::from_rgb(200, 60, 60));
                        if ui.add(delete).clicked() {
                            confirmed = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancelled = true;
                        }
                    });
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            cancelled = true;
        }

        if confirmed {
            match self.entries.clear() {
                Ok(()) => self.toasts.info("All data cleared"),
                Err(e) => {
                    log::error!("Failed to clear health data: {}", e);
                    self.toasts.error(format!("Failed to clear data: {}", e));
                }
            }
        }
        if confirmed || cancelled {
            self.windows.show_clear_confirm = false;
        }
    }

    fn render_help_window(&mut self, ctx: &egui::Context) {
        if !self.windows.show_help {
            return;
        }

        let mut open = true;
        egui::Window::new("How to use Health Timeline")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                for (heading, body) in HELP_TOPICS {
                    ui.label(RichText::new(*heading).strong());
                    ui.label(RichText::new(*body).color(self.theme.text_secondary));
                    ui.add_space(8.0);
                }
            });

        if !open {
            self.windows.show_help = false;
        }
    }
}

const HELP_TOPICS: &[(&str, &str)] = &[
    (
        "Adding entries",
        "Double-click anywhere on the timeline grid to create a new entry at that month, \
         or use the \"Add Entry\" button in the toolbar.",
    ),
    (
        "Editing entries",
        "Click an entry bar to edit its title, description or dates, or to delete it.",
    ),
    (
        "Moving entries",
        "Drag an entry bar left or right to move it to a different date.",
    ),
    (
        "Resizing entries",
        "Drag the left or right edge of an entry bar to change its start or end date.",
    ),
    (
        "Scrolling and zoom",
        "Drag on empty space to scroll horizontally. Use the zoom buttons or Ctrl + mouse wheel to change the scale.",
    ),
    (
        "Export / Import",
        "Export your data as JSON or readable text. Import a JSON export to restore it; this replaces all existing data.",
    ),
];
