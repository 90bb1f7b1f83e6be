mod app;
pub mod entry_dialog;
pub mod theme;
pub mod timeline_view;

pub use app::HealthTimelineApp;
