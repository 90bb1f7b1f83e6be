//! Colors for the timeline window.
//!
//! A light and a dark palette, plus the per-section bar colors derived from
//! each section's hex color token.

use egui::Color32;

use crate::models::section::SectionType;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,
    pub app_background: Color32,
    pub grid_background: Color32,
    pub header_background: Color32,
    /// Background of the current year and month cells
    pub current_highlight: Color32,
    pub grid_line: Color32,
    /// Heavier divider drawn after December
    pub year_divider: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    /// Live date label shown while dragging
    pub accent: Color32,
}

impl TimelineTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(248, 249, 250),
            grid_background: Color32::WHITE,
            header_background: Color32::from_rgb(241, 243, 245),
            current_highlight: Color32::from_rgb(231, 245, 255),
            grid_line: Color32::from_rgb(233, 236, 239),
            year_divider: Color32::from_rgb(206, 212, 218),
            text_primary: Color32::from_rgb(33, 37, 41),
            text_secondary: Color32::from_rgb(134, 142, 150),
            accent: Color32::from_rgb(34, 139, 230),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(26, 27, 30),
            grid_background: Color32::from_rgb(37, 38, 43),
            header_background: Color32::from_rgb(44, 46, 51),
            current_highlight: Color32::from_rgb(25, 55, 85),
            grid_line: Color32::from_rgb(55, 58, 64),
            year_divider: Color32::from_rgb(92, 95, 102),
            text_primary: Color32::from_rgb(233, 236, 239),
            text_secondary: Color32::from_rgb(144, 146, 150),
            accent: Color32::from_rgb(77, 171, 247),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.window_fill = self.grid_background;
        visuals.panel_fill = self.app_background;
        visuals.override_text_color = Some(self.text_primary);
        ctx.set_visuals(visuals);
    }

    /// Bar fill; dragged bars are drawn a little stronger.
    pub fn section_fill(&self, section: SectionType, dragging: bool) -> Color32 {
        let base = section_color(section);
        let strength = match (self.is_dark, dragging) {
            (false, false) => 0.18,
            (false, true) => 0.32,
            (true, false) => 0.35,
            (true, true) => 0.5,
        };
        blend(self.grid_background, base, strength)
    }

    pub fn section_stroke(&self, section: SectionType, dragging: bool) -> Color32 {
        let base = section_color(section);
        if dragging {
            base
        } else {
            blend(self.grid_background, base, 0.7)
        }
    }

    pub fn section_text(&self, section: SectionType) -> Color32 {
        let base = section_color(section);
        if self.is_dark {
            blend(base, Color32::WHITE, 0.6)
        } else {
            blend(base, Color32::BLACK, 0.5)
        }
    }
}

/// Base color of a section, from its hex token.
pub fn section_color(section: SectionType) -> Color32 {
    parse_color(section.color_hex()).unwrap_or(Color32::GRAY)
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Linear mix of two opaque colors; `t = 0` is `from`, `t = 1` is `to`.
fn blend(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
}
