//! Short-lived feedback messages ("Entry saved", "Import failed", ...)
//! stacked in the bottom-right corner.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

const TOAST_WIDTH: f32 = 300.0;
const TOAST_HEIGHT: f32 = 40.0;
const FADE_OUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Error => "✗",
        }
    }

    fn colors(&self, is_dark: bool) -> (Color32, Color32) {
        match (self, is_dark) {
            (ToastLevel::Success, false) => (Color32::from_rgb(220, 255, 220), Color32::from_rgb(30, 120, 50)),
            (ToastLevel::Success, true) => (Color32::from_rgb(30, 70, 40), Color32::from_rgb(100, 220, 120)),
            (ToastLevel::Info, false) => (Color32::from_rgb(220, 235, 255), Color32::from_rgb(30, 80, 150)),
            (ToastLevel::Info, true) => (Color32::from_rgb(30, 50, 80), Color32::from_rgb(100, 180, 255)),
            (ToastLevel::Error, false) => (Color32::from_rgb(255, 220, 220), Color32::from_rgb(180, 40, 40)),
            (ToastLevel::Error, true) => (Color32::from_rgb(80, 30, 30), Color32::from_rgb(255, 120, 120)),
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    level: ToastLevel,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    fn opacity(&self) -> f32 {
        let remaining = self.duration.saturating_sub(self.created_at.elapsed());
        (remaining.as_secs_f32() / FADE_OUT.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        let duration = match level {
            ToastLevel::Error => Duration::from_secs(5),
            _ => Duration::from_secs(3),
        };
        self.toasts.push(Toast {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn render(&mut self, ctx: &Context, is_dark: bool) {
        self.toasts.retain(|toast| toast.opacity() > 0.0);
        if self.toasts.is_empty() {
            return;
        }
        ctx.request_repaint();

        let screen = ctx.screen_rect();
        for (i, toast) in self.toasts.iter().enumerate() {
            let pos = Pos2::new(
                screen.right() - TOAST_WIDTH - 10.0,
                screen.bottom() - (TOAST_HEIGHT + 5.0) * (i as f32 + 1.0) - 5.0,
            );
            let opacity = toast.opacity();
            let (background, text) = toast.level.colors(is_dark);

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(background.gamma_multiply(0.9 * opacity))
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.set_min_width(TOAST_WIDTH - 24.0);
                            let color = text.gamma_multiply(opacity);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(color).strong());
                                ui.label(RichText::new(&toast.message).color(color));
                            });
                        });
                });
        }
    }
}
