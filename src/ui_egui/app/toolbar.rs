use egui::RichText;

use super::HealthTimelineApp;
use crate::services::timeline::layout::year_span;
use crate::ui_egui::timeline_view::preview_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ToolbarAction {
    AddEntry,
    ZoomIn,
    ZoomOut,
    OpenExport,
    OpenImport,
    ConfirmClear,
    ShowBackups,
    ToggleTheme,
    ShowHelp,
}

/// Top bar: title, zoom controls, visible year range and data actions.
impl HealthTimelineApp {
    pub(super) fn render_toolbar(&mut self, ctx: &egui::Context) -> Option<ToolbarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Health Timeline").strong().size(18.0));
                ui.add_space(12.0);

                if ui.button("➕ Add Entry").clicked() {
                    action = Some(ToolbarAction::AddEntry);
                }

                ui.separator();

                let zoom = self.view.zoom;
                if ui
                    .add_enabled(zoom.can_zoom_out(), egui::Button::new("➖"))
                    .on_hover_text("Zoom out")
                    .clicked()
                {
                    action = Some(ToolbarAction::ZoomOut);
                }
                if ui
                    .add_enabled(zoom.can_zoom_in(), egui::Button::new("➕"))
                    .on_hover_text("Zoom in")
                    .clicked()
                {
                    action = Some(ToolbarAction::ZoomIn);
                }

                let (start_year, end_year) = year_span(self.entries.entries(), self.today);
                ui.label(
                    RichText::new(format!("{} - {}", start_year, end_year))
                        .color(self.theme.text_secondary),
                );

                if let Some(range) = self.view.drag_preview() {
                    ui.separator();
                    ui.label(
                        RichText::new(preview_label(range))
                            .strong()
                            .color(self.theme.accent),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❓").on_hover_text("Help").clicked() {
                        action = Some(ToolbarAction::ShowHelp);
                    }
                    let theme_icon = if self.theme.is_dark { "☀" } else { "🌙" };
                    if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                        action = Some(ToolbarAction::ToggleTheme);
                    }
                    if ui.button("🗄 Backups").clicked() {
                        action = Some(ToolbarAction::ShowBackups);
                    }
                    if ui.button("🗑 Clear").clicked() {
                        action = Some(ToolbarAction::ConfirmClear);
                    }
                    if ui.button("📥 Import").clicked() {
                        action = Some(ToolbarAction::OpenImport);
                    }
                    if ui.button("📤 Export").clicked() {
                        action = Some(ToolbarAction::OpenExport);
                    }
                });
            });
            ui.add_space(4.0);
        });

        action
    }

    pub(super) fn handle_toolbar_action(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        match action {
            ToolbarAction::AddEntry => self.open_new_entry(),
            ToolbarAction::ZoomIn => {
                self.view.zoom_in();
            }
            ToolbarAction::ZoomOut => {
                self.view.zoom_out();
            }
            ToolbarAction::OpenExport => self.windows.open_export(),
            ToolbarAction::OpenImport => self.windows.open_import(),
            ToolbarAction::ConfirmClear => self.windows.show_clear_confirm = true,
            ToolbarAction::ShowBackups => self.open_backups(),
            ToolbarAction::ToggleTheme => self.toggle_theme(ctx),
            ToolbarAction::ShowHelp => self.windows.show_help = true,
        }
    }
}
