// Health Timeline Application
// Main entry point

use health_timeline::services::backup::BackupService;
use health_timeline::services::settings::{resolve_data_path, SettingsService};
use health_timeline::ui_egui::HealthTimelineApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Health Timeline");

    let settings_service = SettingsService::from_default_location();
    let settings = settings_service.load();
    let data_path = resolve_data_path(&settings);

    match BackupService::auto_backup_on_startup(&data_path, settings.backup_keep_count) {
        Ok(Some(path)) => log::info!("Automatic backup created at {:?}", path),
        Ok(None) => {}
        Err(e) => log::warn!("Failed to create automatic backup on startup: {:#}", e),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Health Timeline",
        options,
        Box::new(move |cc| {
            Ok(Box::new(HealthTimelineApp::new(
                cc,
                settings_service,
                settings,
                data_path,
            )))
        }),
    )
}
