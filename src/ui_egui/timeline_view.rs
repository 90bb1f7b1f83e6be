//! egui surface for the timeline.
//!
//! Paints a [`TimelineLayout`] (sticky section labels on the left, headers,
//! month grid, entry bars) and translates raw pointer input into
//! [`GestureEvent`]s for [`ViewState::dispatch`]. Horizontal scrolling is owned
//! by the view state so panning and drag previews stay in one place; vertical
//! scrolling uses a regular scroll area.

use std::collections::HashMap;

use chrono::NaiveDate;
use egui::{Align2, CursorIcon, FontId, PointerButton, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::models::entry::{DateRange, TimelineEntry};
use crate::services::timeline::gesture::{GestureEvent, GestureState, Grip, PointerTarget};
use crate::services::timeline::layout::{
    compute_layout, EntryRect, Rect as GridRect, TimelineLayout, HEADER_HEIGHT, LABEL_COLUMN_WIDTH,
    MONTH_HEADER_HEIGHT, YEAR_HEADER_HEIGHT,
};
use crate::services::timeline::{TimelineAction, ViewState};
use crate::ui_egui::theme::TimelineTheme;
use crate::utils::date::format_display_date;

pub struct TimelineView<'a> {
    pub entries: &'a [TimelineEntry],
    pub theme: &'a TimelineTheme,
    pub today: NaiveDate,
    /// Pointer input is ignored while a dialog is open
    pub interactive: bool,
}

/// Maps grid coordinates to screen positions for the current frame.
#[derive(Debug, Clone, Copy)]
struct Surface {
    grid_origin: Pos2,
    scroll: f32,
}

impl Surface {
    fn to_grid(self, pos: Pos2) -> (f32, f32) {
        (
            pos.x - self.grid_origin.x + self.scroll,
            pos.y - self.grid_origin.y,
        )
    }

    fn to_screen(self, rect: &GridRect) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                self.grid_origin.x + rect.left - self.scroll,
                self.grid_origin.y + rect.top,
            ),
            Vec2::new(rect.width, rect.height),
        )
    }

    fn x(self, grid_x: f32) -> f32 {
        self.grid_origin.x + grid_x - self.scroll
    }
}

impl TimelineView<'_> {
    /// Render the timeline and return the actions produced by this frame's input.
    /// `center_on` scrolls the given day to the middle of the visible grid.
    pub fn show(
        &self,
        ui: &mut Ui,
        view: &mut ViewState,
        center_on: Option<NaiveDate>,
    ) -> Vec<TimelineAction> {
        let mut actions = Vec::new();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let mut layout = compute_layout(self.entries, view, self.today);
                let width = ui.available_width().max(LABEL_COLUMN_WIDTH + 1.0);
                let (response, painter) =
                    ui.allocate_painter(Vec2::new(width, layout.total_height), Sense::hover());
                let surface_rect = response.rect;
                let grid_clip = Rect::from_min_max(
                    Pos2::new(surface_rect.left() + LABEL_COLUMN_WIDTH, surface_rect.top()),
                    surface_rect.max,
                );
                let visible_width = grid_clip.width();

                if let Some(date) = center_on {
                    view.scroll_offset =
                        centered_scroll(&layout, date, visible_width);
                }

                if self.interactive {
                    let steps = wheel_zoom_steps(ui);
                    if steps != 0 && ui.rect_contains_pointer(grid_clip) {
                        let anchor = ui
                            .input(|i| i.pointer.hover_pos())
                            .map_or(0.0, |pos| pos.x - grid_clip.left());
                        let old_width = view.zoom.month_width();
                        let changed = if steps > 0 { view.zoom_in() } else { view.zoom_out() };
                        if changed {
                            view.scroll_offset = rescale_scroll(
                                view.scroll_offset,
                                old_width,
                                view.zoom.month_width(),
                                anchor,
                            );
                            layout = compute_layout(self.entries, view, self.today);
                        }
                    } else if ui.rect_contains_pointer(grid_clip) {
                        let dx = ui.input(|i| i.smooth_scroll_delta.x);
                        view.scroll_offset -= dx;
                    }
                }
                view.scroll_offset = clamp_scroll(view.scroll_offset, &layout, visible_width);

                if self.interactive {
                    let surface = Surface {
                        grid_origin: grid_clip.min,
                        scroll: view.scroll_offset,
                    };
                    let visible = surface_rect.intersect(ui.clip_rect());
                    let events = collect_events(ui, &layout, surface, grid_clip, visible, &view.gesture);
                    if !events.is_empty() {
                        for event in &events {
                            actions.extend(view.dispatch(event, self.entries, &layout));
                        }
                        view.scroll_offset =
                            clamp_scroll(view.scroll_offset, &layout, visible_width);
                        layout = compute_layout(self.entries, view, self.today);
                    }
                }

                let surface = Surface {
                    grid_origin: grid_clip.min,
                    scroll: view.scroll_offset,
                };
                let titles: HashMap<&str, &TimelineEntry> = self
                    .entries
                    .iter()
                    .map(|entry| (entry.id.as_str(), entry))
                    .collect();

                let grid_painter = painter.with_clip_rect(grid_clip.intersect(painter.clip_rect()));
                self.paint_grid(&grid_painter, &layout, surface);
                self.paint_entries(&grid_painter, &layout, surface, &titles);
                self.paint_headers(&grid_painter, &layout, surface);
                self.paint_labels(&painter, &layout, surface_rect);

                if self.interactive {
                    self.update_cursor_and_tooltip(ui, response, &layout, surface, grid_clip, view, &titles);
                }
            });

        actions
    }

    fn paint_grid(&self, painter: &egui::Painter, layout: &TimelineLayout, surface: Surface) {
        let theme = self.theme;
        painter.rect_filled(painter.clip_rect(), 0.0, theme.grid_background);

        let top = surface.grid_origin.y + HEADER_HEIGHT;
        let bottom = surface.grid_origin.y + layout.total_height;
        for month in &layout.months {
            let left = surface.x(month.rect.left);
            let right = left + month.rect.width;
            if month.is_current_month {
                painter.rect_filled(
                    Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, bottom)),
                    0.0,
                    theme.current_highlight.gamma_multiply(0.5),
                );
            }
            let stroke = if month.is_year_boundary {
                Stroke::new(2.0, theme.year_divider)
            } else {
                Stroke::new(1.0, theme.grid_line)
            };
            painter.vline(right, top..=bottom, stroke);
        }

        for section in &layout.sections {
            let y = surface.grid_origin.y + section.bottom();
            painter.hline(
                surface.x(0.0)..=surface.x(layout.total_width),
                y,
                Stroke::new(1.0, theme.year_divider),
            );
        }
    }

    fn paint_entries(
        &self,
        painter: &egui::Painter,
        layout: &TimelineLayout,
        surface: Surface,
        titles: &HashMap<&str, &TimelineEntry>,
    ) {
        // Dragged bar last so it sits above its neighbours.
        let mut ordered: Vec<&EntryRect> = layout.entries.iter().collect();
        ordered.sort_by_key(|rect| rect.is_dragging);

        for entry_rect in ordered {
            let rect = surface.to_screen(&entry_rect.rect);
            if !painter.clip_rect().intersects(rect) {
                continue;
            }
            let section = entry_rect.section;
            let dragging = entry_rect.is_dragging;
            painter.rect(
                rect,
                Rounding::same(4.0),
                self.theme.section_fill(section, dragging),
                Stroke::new(1.0, self.theme.section_stroke(section, dragging)),
            );

            if rect.width() >= 16.0 {
                let handle = Vec2::new(3.0, 14.0);
                let color = self.theme.section_stroke(section, false).gamma_multiply(0.6);
                for x in [rect.left() + 2.0, rect.right() - 5.0] {
                    painter.rect_filled(
                        Rect::from_min_size(Pos2::new(x, rect.center().y - handle.y / 2.0), handle),
                        Rounding::same(2.0),
                        color,
                    );
                }
            }

            if let Some(entry) = titles.get(entry_rect.id.as_str()) {
                let text_clip = rect.shrink2(Vec2::new(8.0, 0.0)).intersect(painter.clip_rect());
                if text_clip.width() > 4.0 {
                    painter.with_clip_rect(text_clip).text(
                        Pos2::new(rect.left() + 10.0, rect.center().y),
                        Align2::LEFT_CENTER,
                        &entry.title,
                        FontId::proportional(12.0),
                        self.theme.section_text(section),
                    );
                }
            }
        }
    }

    fn paint_headers(&self, painter: &egui::Painter, layout: &TimelineLayout, surface: Surface) {
        let theme = self.theme;
        let header = Rect::from_min_size(
            surface.grid_origin,
            Vec2::new(painter.clip_rect().width(), HEADER_HEIGHT),
        );
        painter.rect_filled(header, 0.0, theme.header_background);

        for year in &layout.years {
            let rect = surface.to_screen(&year.rect);
            if year.is_current_year {
                painter.rect_filled(rect, 0.0, theme.current_highlight);
            }
            painter.vline(rect.right(), rect.y_range(), Stroke::new(2.0, theme.year_divider));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                year.year.to_string(),
                FontId::proportional(13.0),
                theme.text_primary,
            );
        }

        for month in &layout.months {
            let rect = surface.to_screen(&month.rect);
            if month.is_current_month {
                painter.rect_filled(rect, 0.0, theme.current_highlight);
            }
            let stroke = if month.is_year_boundary {
                Stroke::new(2.0, theme.year_divider)
            } else {
                Stroke::new(1.0, theme.grid_line)
            };
            painter.vline(rect.right(), rect.y_range(), stroke);
            if let Some(label) = month_label(month.month, layout.month_width) {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    label,
                    FontId::proportional(11.0),
                    theme.text_secondary,
                );
            }
        }

        let y = surface.grid_origin.y;
        for line_y in [y + YEAR_HEADER_HEIGHT, y + YEAR_HEADER_HEIGHT + MONTH_HEADER_HEIGHT] {
            painter.hline(header.x_range(), line_y, Stroke::new(1.0, theme.year_divider));
        }
    }

    fn paint_labels(&self, painter: &egui::Painter, layout: &TimelineLayout, surface_rect: Rect) {
        let theme = self.theme;
        let column = Rect::from_min_size(
            surface_rect.min,
            Vec2::new(LABEL_COLUMN_WIDTH, layout.total_height),
        );
        painter.rect_filled(column, 0.0, theme.app_background);
        painter.rect_filled(
            Rect::from_min_size(column.min, Vec2::new(LABEL_COLUMN_WIDTH, HEADER_HEIGHT)),
            0.0,
            theme.header_background,
        );

        for section in &layout.sections {
            let top = column.top() + section.top;
            let bottom = column.top() + section.bottom();
            painter.hline(column.x_range(), bottom, Stroke::new(1.0, theme.year_divider));

            let badge_color = crate::ui_egui::theme::section_color(section.section);
            let galley = painter.layout_no_wrap(
                section.section.label().to_string(),
                FontId::proportional(11.0),
                self.theme.section_text(section.section),
            );
            let badge = Rect::from_min_size(
                Pos2::new(column.left() + 8.0, (top + bottom) / 2.0 - 10.0),
                Vec2::new(galley.size().x + 16.0, 20.0),
            );
            painter.rect_filled(badge, Rounding::same(10.0), badge_color.gamma_multiply(0.2));
            painter.galley(
                Pos2::new(badge.left() + 8.0, badge.center().y - galley.size().y / 2.0),
                galley,
                theme.text_primary,
            );
        }

        painter.vline(column.right(), column.y_range(), Stroke::new(1.0, theme.year_divider));
    }

    #[allow(clippy::too_many_arguments)]
    fn update_cursor_and_tooltip(
        &self,
        ui: &Ui,
        response: egui::Response,
        layout: &TimelineLayout,
        surface: Surface,
        grid_clip: Rect,
        view: &ViewState,
        titles: &HashMap<&str, &TimelineEntry>,
    ) {
        let cursor = match &view.gesture {
            GestureState::Dragging(drag) if drag.grip != Grip::Move => Some(CursorIcon::ResizeHorizontal),
            GestureState::Dragging(_) | GestureState::Panning(_) => Some(CursorIcon::Grabbing),
            GestureState::Idle => None,
        };
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
            return;
        }

        let Some(pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        if !ui.rect_contains_pointer(grid_clip) {
            return;
        }
        let (x, y) = surface.to_grid(pos);
        match layout.pointer_target(x, y) {
            Some(PointerTarget::Entry { id, grip, .. }) => {
                ui.ctx().set_cursor_icon(match grip {
                    Grip::Move => CursorIcon::Grab,
                    Grip::ResizeStart | Grip::ResizeEnd => CursorIcon::ResizeHorizontal,
                });
                if let Some(entry) = titles.get(id.as_str()) {
                    let _ = response
                        .on_hover_text_at_pointer(entry_tooltip(&entry.title, entry.date_range()));
                }
            }
            Some(PointerTarget::EmptyGrid) => ui.ctx().set_cursor_icon(CursorIcon::Grab),
            None => {}
        }
    }
}

/// Translate this frame's raw pointer input into gesture events, in the order
/// press, move, release, leave, double-click.
fn collect_events(
    ui: &Ui,
    layout: &TimelineLayout,
    surface: Surface,
    grid_clip: Rect,
    visible: Rect,
    gesture: &GestureState,
) -> Vec<GestureEvent> {
    let (pressed, released, double_clicked, delta, hover_pos, press_pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.button_double_clicked(PointerButton::Primary),
            i.pointer.delta(),
            i.pointer.hover_pos(),
            i.pointer.press_origin(),
        )
    });
    let over_grid = ui.rect_contains_pointer(grid_clip);
    let mut events = Vec::new();

    if pressed && over_grid {
        if let Some(pos) = press_pos.or(hover_pos) {
            let (x, y) = surface.to_grid(pos);
            if let Some(target) = layout.pointer_target(x, y) {
                events.push(GestureEvent::PointerDown { x: pos.x, target });
            }
        }
    }

    let press_x = match events.first() {
        Some(GestureEvent::PointerDown { x, .. }) => Some(*x),
        _ => None,
    };
    let active = !gesture.is_idle() || press_x.is_some();
    if active {
        if let Some(x) = move_position(delta, hover_pos, press_x) {
            events.push(GestureEvent::PointerMove { x });
        }
    }

    if active && released {
        events.push(GestureEvent::PointerUp);
    } else if active && !hover_pos.map_or(false, |pos| visible.contains(pos)) {
        events.push(GestureEvent::PointerLeave);
    }

    if double_clicked && over_grid {
        if let Some(pos) = hover_pos {
            let (x, y) = surface.to_grid(pos);
            if layout.pointer_target(x, y) == Some(PointerTarget::EmptyGrid) {
                if let Some(section) = layout.section_at(y) {
                    events.push(GestureEvent::DoubleClick {
                        grid_x: x,
                        section: section.section,
                    });
                }
            }
        }
    }

    events
}

/// Pointer x to report as a move this frame. Any motion counts, with no click
/// distance; on the press frame only motion away from the press point does.
fn move_position(delta: Vec2, hover_pos: Option<Pos2>, press_x: Option<f32>) -> Option<f32> {
    let pos = hover_pos?;
    if delta == Vec2::ZERO || press_x == Some(pos.x) {
        return None;
    }
    Some(pos.x)
}

/// Zoom step requested by ctrl + mouse wheel (or a pinch) this frame.
fn wheel_zoom_steps(ui: &Ui) -> i32 {
    ui.input(|i| {
        let zoom = i.zoom_delta();
        if zoom > 1.0 {
            1
        } else if zoom < 1.0 {
            -1
        } else if i.modifiers.ctrl && i.raw_scroll_delta.y != 0.0 {
            if i.raw_scroll_delta.y > 0.0 {
                1
            } else {
                -1
            }
        } else {
            0
        }
    })
}

fn clamp_scroll(scroll: f32, layout: &TimelineLayout, visible_width: f32) -> f32 {
    let max_scroll = (layout.total_width - visible_width).max(0.0);
    scroll.clamp(0.0, max_scroll)
}

/// Scroll offset that puts `date` in the middle of the visible grid.
fn centered_scroll(layout: &TimelineLayout, date: NaiveDate, visible_width: f32) -> f32 {
    let x = layout.mapper().to_offset(date);
    clamp_scroll(x - visible_width / 2.0, layout, visible_width)
}

/// Keep the day under `anchor` (pixels from the grid's left edge) in place
/// when the month width changes.
fn rescale_scroll(scroll: f32, old_width: f32, new_width: f32, anchor: f32) -> f32 {
    if old_width <= 0.0 {
        return scroll;
    }
    let content_x = scroll + anchor;
    (content_x * new_width / old_width - anchor).max(0.0)
}

/// Month header text for a cell of the given width; none when too narrow.
fn month_label(month: NaiveDate, month_width: f32) -> Option<String> {
    if month_width >= 28.0 {
        Some(month.format("%b").to_string())
    } else if month_width >= 12.0 {
        month.format("%b").to_string().chars().next().map(String::from)
    } else {
        None
    }
}

/// Hover text for an entry bar, e.g. `Flu (Jan 10, 2024 - Jan 20, 2024)`.
pub fn entry_tooltip(title: &str, range: DateRange) -> String {
    match range.end {
        Some(end) => format!(
            "{} ({} - {})",
            title,
            format_display_date(range.start),
            format_display_date(end)
        ),
        None => format!("{} ({})", title, format_display_date(range.start)),
    }
}

/// Label shown in the toolbar while a drag preview is live.
pub fn preview_label(range: DateRange) -> String {
    match range.end {
        Some(end) => format!(
            "{} - {}",
            format_display_date(range.start),
            format_display_date(end)
        ),
        None => format_display_date(range.start),
    }
}
