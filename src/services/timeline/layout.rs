//! Timeline layout engine.
//!
//! Turns the entry collection and a [`ViewState`] into drawable geometry:
//! year and month header cells, one band per section sized by its packed
//! row count, and an absolute rectangle per visible entry. All coordinates
//! are relative to the grid origin (left edge of the first visible month,
//! top of the year header); the section label column is not included.

use chrono::{Datelike, NaiveDate};

use super::gesture::{Grip, PointerTarget};
use super::mapper::DateMapper;
use super::packer::SectionRows;
use super::ViewState;
use crate::models::entry::{DateRange, EntryId, TimelineEntry};
use crate::models::section::{SectionType, SECTION_ORDER};
use crate::utils::date::{add_days, add_months, first_of_year};

pub const YEAR_HEADER_HEIGHT: f32 = 25.0;
pub const MONTH_HEADER_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = YEAR_HEADER_HEIGHT + MONTH_HEADER_HEIGHT;
/// Vertical pitch of one packed row.
pub const ROW_HEIGHT: f32 = 36.0;
pub const ENTRY_HEIGHT: f32 = 30.0;
pub const ENTRY_TOP_PADDING: f32 = 6.0;
pub const SECTION_PADDING: f32 = 12.0;
/// Width of the section label column drawn left of the grid.
pub const LABEL_COLUMN_WIDTH: f32 = 150.0;
/// Hit width of the resize grips at each end of an entry bar.
pub const GRIP_WIDTH: f32 = 8.0;
/// Years before the current one that are always visible.
pub const DEFAULT_YEARS_BACK: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearHeader {
    pub year: i32,
    pub rect: Rect,
    pub is_current_year: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthHeader {
    /// First day of the month
    pub month: NaiveDate,
    pub rect: Rect,
    pub is_current_month: bool,
    /// December: the cell closes a year and gets a heavier divider
    pub is_year_boundary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub section: SectionType,
    pub top: f32,
    pub height: f32,
    pub row_count: usize,
}

impl SectionLayout {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryRect {
    pub id: EntryId,
    pub section: SectionType,
    pub row: usize,
    pub rect: Rect,
    /// Dates the rect was computed from (the preview while dragging)
    pub range: DateRange,
    /// Dates currently stored on the entry
    pub committed: DateRange,
    pub is_dragging: bool,
}

impl EntryRect {
    /// Grip under horizontal position `x`. Narrow bars keep a move zone in the middle third.
    pub fn grip_at(&self, x: f32) -> Grip {
        let grip = GRIP_WIDTH.min(self.rect.width / 3.0);
        if x < self.rect.left + grip {
            Grip::ResizeStart
        } else if x >= self.rect.right() - grip {
            Grip::ResizeEnd
        } else {
            Grip::Move
        }
    }
}

/// Complete drawable description of the timeline for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub start_year: i32,
    pub end_year: i32,
    pub month_width: f32,
    pub total_width: f32,
    pub total_height: f32,
    pub years: Vec<YearHeader>,
    pub months: Vec<MonthHeader>,
    pub sections: Vec<SectionLayout>,
    pub entries: Vec<EntryRect>,
    pub rows: SectionRows,
}

impl TimelineLayout {
    pub fn mapper(&self) -> DateMapper {
        DateMapper::new(first_of_year(self.start_year), self.month_width)
    }

    pub fn entry(&self, id: &str) -> Option<&EntryRect> {
        self.entries.iter().find(|rect| rect.id == id)
    }

    pub fn section_at(&self, y: f32) -> Option<&SectionLayout> {
        self.sections
            .iter()
            .find(|section| y >= section.top && y < section.bottom())
    }

    /// Topmost entry under the point; a dragged entry wins over its neighbours.
    pub fn entry_at(&self, x: f32, y: f32) -> Option<&EntryRect> {
        self.entries
            .iter()
            .filter(|rect| rect.rect.contains(x, y))
            .max_by_key(|rect| rect.is_dragging)
    }

    /// Resolve a grid point to a gesture target. `None` over headers or outside the grid.
    pub fn pointer_target(&self, x: f32, y: f32) -> Option<PointerTarget> {
        if x < 0.0 || x >= self.total_width {
            return None;
        }
        if let Some(rect) = self.entry_at(x, y) {
            return Some(PointerTarget::Entry {
                id: rect.id.clone(),
                grip: rect.grip_at(x),
                range: rect.committed,
            });
        }
        self.section_at(y).map(|_| PointerTarget::EmptyGrid)
    }
}

/// Visible year span: always includes today and the two years before it,
/// widened to cover every entry.
pub fn year_span(entries: &[TimelineEntry], today: NaiveDate) -> (i32, i32) {
    let current_year = today.year();
    entries.iter().fold(
        (current_year - DEFAULT_YEARS_BACK, current_year),
        |(min_year, max_year), entry| {
            let range = entry.date_range();
            (
                min_year.min(range.start.year()),
                max_year.max(range.last_day().year()),
            )
        },
    )
}

pub fn section_height(row_count: usize) -> f32 {
    row_count.max(1) as f32 * ROW_HEIGHT + SECTION_PADDING
}

/// Lay out `entries` for `view`. Row assignment is taken from the view while a
/// drag is in progress so bars never jump rows mid-gesture.
pub fn compute_layout(entries: &[TimelineEntry], view: &ViewState, today: NaiveDate) -> TimelineLayout {
    let (start_year, end_year) = year_span(entries, today);
    let month_width = view.zoom.month_width();
    let mapper = DateMapper::new(first_of_year(start_year), month_width);
    let total_months = ((end_year - start_year + 1) * 12) as usize;
    let total_width = total_months as f32 * month_width;

    let years = (start_year..=end_year)
        .enumerate()
        .map(|(idx, year)| YearHeader {
            year,
            rect: Rect::new(
                idx as f32 * 12.0 * month_width,
                0.0,
                12.0 * month_width,
                YEAR_HEADER_HEIGHT,
            ),
            is_current_year: year == today.year(),
        })
        .collect();

    let months = (0..total_months)
        .map(|idx| {
            let month = add_months(mapper.view_start(), idx as u32);
            MonthHeader {
                month,
                rect: Rect::new(
                    idx as f32 * month_width,
                    YEAR_HEADER_HEIGHT,
                    month_width,
                    MONTH_HEADER_HEIGHT,
                ),
                is_current_month: month.year() == today.year() && month.month() == today.month(),
                is_year_boundary: month.month() == 12,
            }
        })
        .collect();

    let rows = match view.frozen_rows() {
        Some(frozen) if view.gesture.is_dragging() => frozen.clone(),
        _ => SectionRows::pack(entries),
    };

    let mut sections = Vec::with_capacity(SECTION_ORDER.len());
    let mut top = HEADER_HEIGHT;
    for section in SECTION_ORDER {
        let row_count = rows.row_count(section);
        let height = section_height(row_count);
        sections.push(SectionLayout {
            section,
            top,
            height,
            row_count,
        });
        top += height;
    }
    let total_height = top;

    let drag = view.drag_state();
    let mut entry_rects = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(row) = rows.row_of(&entry.id) else {
            continue;
        };
        let Some(section) = sections.iter().find(|s| s.section == entry.section_type) else {
            continue;
        };

        let is_dragging = drag.map_or(false, |d| d.entry_id == entry.id);
        let committed = entry.date_range();
        let range = drag
            .filter(|_| is_dragging)
            .and_then(|d| d.preview)
            .unwrap_or(committed);

        let left = mapper.to_offset(range.start);
        let right = mapper.to_offset(add_days(range.last_day(), 1));
        let width = (right - left).max(month_width * 0.5);
        if left + width < 0.0 || left > total_width {
            continue;
        }
        let width = width.min(total_width - left);

        entry_rects.push(EntryRect {
            id: entry.id.clone(),
            section: entry.section_type,
            row,
            rect: Rect::new(
                left,
                section.top + row as f32 * ROW_HEIGHT + ENTRY_TOP_PADDING,
                width,
                ENTRY_HEIGHT,
            ),
            range,
            committed,
            is_dragging,
        });
    }

    TimelineLayout {
        start_year,
        end_year,
        month_width,
        total_width,
        total_height,
        years,
        months,
        sections,
        entries: entry_rects,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::timeline::gesture::{DragState, GestureState};
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 6, 15)
    }

    fn entry(id: &str, section: SectionType, start: NaiveDate, end: Option<NaiveDate>) -> TimelineEntry {
        let base = TimelineEntry::new(section, start, id).with_id(id);
        match end {
            Some(end) => base.with_end_date(end),
            None => base,
        }
    }

    #[test]
    fn test_empty_layout_spans_three_years() {
        let layout = compute_layout(&[], &ViewState::default(), today());
        assert_eq!((layout.start_year, layout.end_year), (2022, 2024));
        assert_eq!(layout.months.len(), 36);
        assert_eq!(layout.years.len(), 3);
        assert_eq!(layout.total_width, 36.0 * 28.0);
        assert!(layout.entries.is_empty());
    }

    #[test]
    fn test_year_span_expands_to_entries() {
        let entries = vec![
            entry("old", SectionType::Diet, d(2018, 5, 1), None),
            entry("future", SectionType::Diet, d(2025, 11, 1), Some(d(2026, 2, 1))),
        ];
        assert_eq!(year_span(&entries, today()), (2018, 2026));
    }

    #[test]
    fn test_month_header_flags() {
        let layout = compute_layout(&[], &ViewState::default(), today());
        let current: Vec<_> = layout.months.iter().filter(|m| m.is_current_month).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].month, d(2024, 6, 1));
        let boundaries = layout.months.iter().filter(|m| m.is_year_boundary).count();
        assert_eq!(boundaries, 3);
        assert_eq!(layout.months[13].rect.left, 13.0 * 28.0);
        assert!(layout.years[2].is_current_year);
    }

    #[test]
    fn test_section_heights_follow_row_counts() {
        let entries = vec![
            entry("a", SectionType::Medication, d(2024, 1, 1), Some(d(2024, 1, 31))),
            entry("b", SectionType::Medication, d(2024, 1, 15), None),
        ];
        let layout = compute_layout(&entries, &ViewState::default(), today());
        let symptoms = &layout.sections[0];
        let meds = &layout.sections[1];
        assert_eq!(symptoms.top, HEADER_HEIGHT);
        assert_eq!(symptoms.height, 48.0);
        assert_eq!(meds.top, HEADER_HEIGHT + 48.0);
        assert_eq!(meds.row_count, 2);
        assert_eq!(meds.height, 2.0 * 36.0 + 12.0);
        let b = layout.entry("b").unwrap();
        assert_eq!(b.row, 1);
        assert_eq!(b.rect.top, meds.top + 36.0 + 6.0);
        assert_eq!(b.rect.height, ENTRY_HEIGHT);
    }

    #[test]
    fn test_entry_rect_uses_mapper_with_inclusive_end() {
        let entries = vec![entry("a", SectionType::Symptom, d(2024, 1, 1), Some(d(2024, 1, 31)))];
        let layout = compute_layout(&entries, &ViewState::default(), today());
        let rect = layout.entry("a").unwrap().rect;
        assert_eq!(rect.left, 24.0 * 28.0);
        assert!((rect.width - 28.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_entry_gets_half_month_floor() {
        let entries = vec![entry("p", SectionType::Symptom, d(2024, 3, 3), None)];
        let mut view = ViewState::default();
        view.zoom = crate::services::timeline::zoom::ZoomLevel::new(0);
        let layout = compute_layout(&entries, &view, today());
        assert_eq!(layout.entry("p").unwrap().rect.width, 4.0);
    }

    #[test]
    fn test_dragged_entry_renders_preview_on_frozen_row() {
        let entries = vec![
            entry("a", SectionType::Symptom, d(2024, 1, 10), Some(d(2024, 1, 20))),
            entry("b", SectionType::Symptom, d(2024, 1, 15), None),
        ];
        let mut view = ViewState::default();
        view.gesture = GestureState::Dragging(DragState {
            entry_id: "b".into(),
            grip: Grip::Move,
            anchor_x: 0.0,
            original: DateRange::point(d(2024, 1, 15)),
            preview: Some(DateRange::point(d(2024, 4, 1))),
        });
        view.freeze_rows(&entries);

        let layout = compute_layout(&entries, &view, today());
        let b = layout.entry("b").unwrap();
        assert!(b.is_dragging);
        // No longer overlaps "a" but keeps its row while the drag is live.
        assert_eq!(b.row, 1);
        assert_eq!(b.range, DateRange::point(d(2024, 4, 1)));
        assert_eq!(b.committed, DateRange::point(d(2024, 1, 15)));
        assert_eq!(b.rect.left, 27.0 * 28.0);
        assert!(!layout.entry("a").unwrap().is_dragging);
    }

    #[test]
    fn test_width_is_clamped_to_grid_edge() {
        let entries = vec![entry("late", SectionType::Misc, d(2024, 12, 31), None)];
        let layout = compute_layout(&entries, &ViewState::default(), today());
        let rect = layout.entry("late").unwrap().rect;
        assert!(rect.right() <= layout.total_width + 1e-3);
    }

    #[test]
    fn test_pointer_target_resolves_grips_and_empty_cells() {
        let entries = vec![entry("a", SectionType::Symptom, d(2024, 1, 1), Some(d(2024, 3, 31)))];
        let layout = compute_layout(&entries, &ViewState::default(), today());
        let rect = layout.entry("a").unwrap().rect;
        let y = rect.top + 5.0;

        let grip_at = |x: f32| match layout.pointer_target(x, y) {
            Some(PointerTarget::Entry { grip, .. }) => Some(grip),
            _ => None,
        };
        assert_eq!(grip_at(rect.left + 1.0), Some(Grip::ResizeStart));
        assert_eq!(grip_at(rect.left + rect.width / 2.0), Some(Grip::Move));
        assert_eq!(grip_at(rect.right() - 1.0), Some(Grip::ResizeEnd));

        assert_eq!(layout.pointer_target(5.0, y), Some(PointerTarget::EmptyGrid));
        assert_eq!(layout.pointer_target(5.0, 10.0), None);
        assert_eq!(layout.pointer_target(-1.0, y), None);
    }

    #[test]
    fn test_narrow_bar_keeps_move_zone() {
        let rect = EntryRect {
            id: "n".into(),
            section: SectionType::Misc,
            row: 0,
            rect: Rect::new(100.0, 0.0, 9.0, ENTRY_HEIGHT),
            range: DateRange::point(d(2024, 1, 1)),
            committed: DateRange::point(d(2024, 1, 1)),
            is_dragging: false,
        };
        assert_eq!(rect.grip_at(100.5), Grip::ResizeStart);
        assert_eq!(rect.grip_at(104.5), Grip::Move);
        assert_eq!(rect.grip_at(108.5), Grip::ResizeEnd);
    }
}
