use super::toast::ToastManager;
use super::windows::WindowState;
use super::HealthTimelineApp;
use crate::models::settings::Settings;
use crate::services::entry::EntryService;
use crate::services::settings::SettingsService;
use crate::services::storage::StorageService;
use crate::services::timeline::zoom::ZoomLevel;
use crate::services::timeline::ViewState;
use crate::ui_egui::theme::TimelineTheme;
use chrono::Local;
use std::path::PathBuf;

impl HealthTimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_service: SettingsService,
        settings: Settings,
        data_path: PathBuf,
    ) -> Self {
        let entries = EntryService::load(StorageService::new(data_path));

        let theme = TimelineTheme::for_mode(settings.dark_mode);
        theme.apply_to_context(&cc.egui_ctx);
        let view = ViewState::new(ZoomLevel::new(settings.default_zoom_level));

        Self {
            entries,
            settings,
            settings_service,
            view,
            theme,
            entry_dialog: None,
            windows: WindowState::default(),
            toasts: ToastManager::default(),
            center_on_today: true,
            today: Local::now().date_naive(),
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.today = Local::now().date_naive();

        if let Some(action) = self.render_toolbar(ctx) {
            self.handle_toolbar_action(ctx, action);
        }

        self.render_main_panel(ctx);
        self.render_entry_dialog(ctx);
        self.render_windows(ctx);

        self.toasts.render(ctx, self.theme.is_dark);
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
    }
}
