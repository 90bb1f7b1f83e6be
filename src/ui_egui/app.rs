mod lifecycle;
mod toast;
mod toolbar;
mod windows;

use self::toast::ToastManager;
use self::windows::WindowState;
use crate::models::entry::TimelineEntry;
use crate::models::section::SectionType;
use crate::models::settings::Settings;
use crate::services::entry::EntryService;
use crate::services::settings::SettingsService;
use crate::services::timeline::{TimelineObserver, ViewState};
use crate::ui_egui::entry_dialog::{render_entry_dialog, EntryDialogOutcome, EntryDialogState};
use crate::ui_egui::theme::TimelineTheme;
use crate::ui_egui::timeline_view::TimelineView;
use chrono::NaiveDate;

pub struct HealthTimelineApp {
    entries: EntryService,
    settings: Settings,
    settings_service: SettingsService,
    /// Zoom, gesture and horizontal scroll of the timeline
    view: ViewState,
    theme: TimelineTheme,
    /// Open create/edit dialog, if any
    entry_dialog: Option<EntryDialogState>,
    windows: WindowState,
    toasts: ToastManager,
    /// Scroll today's month into view on the next frame
    center_on_today: bool,
    today: NaiveDate,
}

impl eframe::App for HealthTimelineApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}

impl TimelineObserver for HealthTimelineApp {
    fn on_entry_commit(&mut self, entry: TimelineEntry) {
        if let Err(e) = self.entries.update(entry) {
            log::error!("Failed to save moved entry: {}", e);
            self.toasts.error(format!("Failed to save: {}", e));
        }
    }

    fn on_entry_activate(&mut self, entry: &TimelineEntry) {
        self.entry_dialog = Some(EntryDialogState::edit(entry));
    }

    fn on_cell_activate(&mut self, date: NaiveDate, section: SectionType) {
        self.entry_dialog = Some(EntryDialogState::new_at(date, section));
    }
}

impl HealthTimelineApp {
    fn open_new_entry(&mut self) {
        self.entry_dialog = Some(EntryDialogState::new_entry(self.today));
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.theme = TimelineTheme::for_mode(self.settings.dark_mode);
        self.theme.apply_to_context(ctx);
        self.save_settings();
    }

    fn save_settings(&mut self) {
        self.settings.default_zoom_level = self.view.zoom.index();
        if let Err(e) = self.settings_service.save(&self.settings) {
            log::error!("Failed to save settings: {:#}", e);
        }
    }

    /// Pointer input only reaches the timeline while no dialog or window is open.
    fn timeline_interactive(&self) -> bool {
        self.entry_dialog.is_none() && !self.windows.any_open()
    }

    fn render_main_panel(&mut self, ctx: &egui::Context) {
        let center_on = self.center_on_today.then_some(self.today);
        self.center_on_today = false;

        let view = TimelineView {
            entries: self.entries.entries(),
            theme: &self.theme,
            today: self.today,
            interactive: self.timeline_interactive(),
        };
        let actions = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.app_background))
            .show(ctx, |ui| view.show(ui, &mut self.view, center_on))
            .inner;

        for action in actions {
            action.deliver(self);
        }
    }

    fn render_entry_dialog(&mut self, ctx: &egui::Context) {
        let Some(state) = self.entry_dialog.as_mut() else {
            return;
        };
        let editing = state.is_editing();

        match render_entry_dialog(ctx, state) {
            EntryDialogOutcome::Open => {}
            EntryDialogOutcome::Cancelled => self.entry_dialog = None,
            EntryDialogOutcome::Saved(entry) => {
                let title = entry.title.clone();
                let result = if editing {
                    self.entries.update(entry)
                } else {
                    self.entries.add(entry)
                };
                match result {
                    Ok(()) => self.toasts.success(format!("Saved \"{}\"", title)),
                    Err(e) => {
                        log::error!("Failed to save entry: {}", e);
                        self.toasts.error(format!("Failed to save: {}", e));
                    }
                }
                self.entry_dialog = None;
            }
            EntryDialogOutcome::Deleted(id) => {
                match self.entries.delete(&id) {
                    Ok(()) => self.toasts.info("Entry deleted"),
                    Err(e) => {
                        log::error!("Failed to delete entry {}: {}", id, e);
                        self.toasts.error(format!("Failed to delete: {}", e));
                    }
                }
                self.entry_dialog = None;
            }
        }
    }
}
