// Drag Gesture Controller
//
// Pure state machine behind pointer interaction on the timeline:
// - Idle -> Dragging on pointer-down over an entry grip (move / resize-start / resize-end)
// - Idle -> Panning on pointer-down over empty grid
// - Dragging and Panning never overlap; a pointer-down during either is ignored
// - Pointer-leave finishes a gesture exactly like pointer-up (commit, never roll back)

use chrono::NaiveDate;

use super::mapper::DateMapper;
use crate::models::entry::{DateRange, EntryId};
use crate::models::section::SectionType;
use crate::utils::date::add_days;

/// Which part of an entry bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grip {
    /// Bar body - shifts both dates
    Move,
    /// Left edge - shifts the start date
    ResizeStart,
    /// Right edge - shifts the end date
    ResizeEnd,
}

/// What was under the pointer when it went down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Entry {
        id: EntryId,
        grip: Grip,
        /// Committed dates of the entry at gesture start
        range: DateRange,
    },
    EmptyGrid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Primary button pressed. `x` is a surface (screen) coordinate.
    PointerDown { x: f32, target: PointerTarget },
    PointerMove { x: f32 },
    PointerUp,
    /// Pointer left the tracked surface.
    PointerLeave,
    /// Double activation on empty grid. `grid_x` is relative to the view origin.
    DoubleClick { grid_x: f32, section: SectionType },
}

/// Active entry drag. The preview only exists once the pointer has moved.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub entry_id: EntryId,
    pub grip: Grip,
    pub anchor_x: f32,
    pub original: DateRange,
    pub preview: Option<DateRange>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanState {
    pub anchor_x: f32,
    pub scroll_at_start: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragState),
    Panning(PanState),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging(_))
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, GestureState::Panning(_))
    }
}

/// Inputs the transition reads but does not own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub mapper: DateMapper,
    pub scroll_offset: f32,
}

/// Requests emitted by a transition, to be carried out by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    /// Completed drag: replace the entry's dates.
    Commit { entry_id: EntryId, range: DateRange },
    /// Click without movement: open the entry for editing.
    Activate { entry_id: EntryId },
    /// Double-click on an empty cell: start a new entry there.
    CreateAt { date: NaiveDate, section: SectionType },
    /// New horizontal scroll offset for the surface.
    ScrollTo(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GestureState,
    pub effects: Vec<GestureEffect>,
}

impl Transition {
    fn to(state: GestureState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: GestureState, effect: GestureEffect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Compute the next gesture state and its side effects.
pub fn transition(state: &GestureState, event: &GestureEvent, ctx: &GestureContext) -> Transition {
    match (state, event) {
        (GestureState::Idle, GestureEvent::PointerDown { x, target }) => match target {
            PointerTarget::Entry { id, grip, range } => Transition::to(GestureState::Dragging(DragState {
                entry_id: id.clone(),
                grip: *grip,
                anchor_x: *x,
                original: *range,
                preview: None,
            })),
            PointerTarget::EmptyGrid => Transition::to(GestureState::Panning(PanState {
                anchor_x: *x,
                scroll_at_start: ctx.scroll_offset,
            })),
        },

        (GestureState::Dragging(drag), GestureEvent::PointerMove { x }) => {
            let delta_days = ctx.mapper.drag_delta_days(x - drag.anchor_x);
            let mut next = drag.clone();
            next.preview = Some(preview_range(drag.grip, drag.original, delta_days));
            Transition::to(GestureState::Dragging(next))
        }

        (GestureState::Dragging(drag), GestureEvent::PointerUp) => match drag.preview {
            Some(range) => Transition::with(GestureState::Idle, commit(drag, range)),
            None => Transition::with(
                GestureState::Idle,
                GestureEffect::Activate {
                    entry_id: drag.entry_id.clone(),
                },
            ),
        },

        (GestureState::Dragging(drag), GestureEvent::PointerLeave) => match drag.preview {
            Some(range) => Transition::with(GestureState::Idle, commit(drag, range)),
            None => Transition::to(GestureState::Idle),
        },

        (GestureState::Panning(pan), GestureEvent::PointerMove { x }) => {
            let offset = (pan.scroll_at_start - (x - pan.anchor_x)).max(0.0);
            Transition::with(GestureState::Panning(*pan), GestureEffect::ScrollTo(offset))
        }

        (GestureState::Panning(_), GestureEvent::PointerUp | GestureEvent::PointerLeave) => {
            Transition::to(GestureState::Idle)
        }

        (GestureState::Idle, GestureEvent::DoubleClick { grid_x, section }) => Transition::with(
            GestureState::Idle,
            GestureEffect::CreateAt {
                date: ctx.mapper.month_at(*grid_x),
                section: *section,
            },
        ),

        // Pointer-down during an active gesture, stray moves/ups while idle,
        // double-clicks mid-gesture.
        (state, _) => Transition::to(state.clone()),
    }
}

fn commit(drag: &DragState, range: DateRange) -> GestureEffect {
    log::debug!(
        "Committing drag of {} ({:?}): {:?} -> {:?}",
        drag.entry_id,
        drag.grip,
        drag.original,
        range
    );
    GestureEffect::Commit {
        entry_id: drag.entry_id.clone(),
        range,
    }
}

/// Tentative dates for a grip shifted by `delta_days`. Never produces an inverted range.
pub fn preview_range(grip: Grip, original: DateRange, delta_days: i64) -> DateRange {
    match grip {
        Grip::Move => DateRange::new(
            add_days(original.start, delta_days),
            original.end.map(|end| add_days(end, delta_days)),
        ),
        Grip::ResizeStart => {
            let mut start = add_days(original.start, delta_days);
            if let Some(end) = original.end {
                if start > end {
                    start = end;
                }
            }
            DateRange::new(start, original.end)
        }
        Grip::ResizeEnd => {
            // A point entry resizes from its start day and gains an end date.
            let end = add_days(original.last_day(), delta_days).max(original.start);
            DateRange::new(original.start, Some(end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ctx() -> GestureContext {
        GestureContext {
            mapper: DateMapper::new(d(2022, 1, 1), 28.0),
            scroll_offset: 100.0,
        }
    }

    fn flu() -> PointerTarget {
        PointerTarget::Entry {
            id: "a".into(),
            grip: Grip::Move,
            range: DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 20))),
        }
    }

    fn run(state: GestureState, events: &[GestureEvent]) -> (GestureState, Vec<GestureEffect>) {
        let mut state = state;
        let mut effects = Vec::new();
        for event in events {
            let next = transition(&state, event, &ctx());
            state = next.state;
            effects.extend(next.effects);
        }
        (state, effects)
    }

    #[test]
    fn test_pointer_down_on_entry_starts_drag_without_preview() {
        let (state, effects) = run(
            GestureState::Idle,
            &[GestureEvent::PointerDown { x: 50.0, target: flu() }],
        );
        let GestureState::Dragging(drag) = state else {
            panic!("expected drag");
        };
        assert_eq!(drag.anchor_x, 50.0);
        assert_eq!(drag.grip, Grip::Move);
        assert!(drag.preview.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_move_then_up_commits_once() {
        let (state, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerDown { x: 50.0, target: flu() },
                GestureEvent::PointerMove { x: 57.0 },
                GestureEvent::PointerMove { x: 64.0 },
                GestureEvent::PointerUp,
            ],
        );
        assert!(state.is_idle());
        assert_eq!(
            effects,
            vec![GestureEffect::Commit {
                entry_id: "a".into(),
                range: DateRange::new(d(2024, 1, 25), Some(d(2024, 2, 4))),
            }]
        );
    }

    #[test]
    fn test_up_without_move_activates() {
        let (_, effects) = run(
            GestureState::Idle,
            &[GestureEvent::PointerDown { x: 50.0, target: flu() }, GestureEvent::PointerUp],
        );
        assert_eq!(effects, vec![GestureEffect::Activate { entry_id: "a".into() }]);
    }

    #[test]
    fn test_leave_commits_current_preview() {
        let (state, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerDown { x: 50.0, target: flu() },
                GestureEvent::PointerMove { x: 22.0 },
                GestureEvent::PointerLeave,
            ],
        );
        assert!(state.is_idle());
        assert_eq!(
            effects,
            vec![GestureEffect::Commit {
                entry_id: "a".into(),
                range: DateRange::new(d(2023, 12, 11), Some(d(2023, 12, 21))),
            }]
        );
    }

    #[test]
    fn test_leave_without_preview_is_silent() {
        let (state, effects) = run(
            GestureState::Idle,
            &[GestureEvent::PointerDown { x: 50.0, target: flu() }, GestureEvent::PointerLeave],
        );
        assert!(state.is_idle());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_pan_scrolls_against_pointer() {
        let (state, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerDown { x: 300.0, target: PointerTarget::EmptyGrid },
                GestureEvent::PointerMove { x: 260.0 },
                GestureEvent::PointerMove { x: 500.0 },
            ],
        );
        assert!(state.is_panning());
        assert_eq!(effects, vec![GestureEffect::ScrollTo(140.0), GestureEffect::ScrollTo(0.0)]);
    }

    #[test]
    fn test_pan_release_returns_to_idle() {
        let (state, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerDown { x: 300.0, target: PointerTarget::EmptyGrid },
                GestureEvent::PointerUp,
            ],
        );
        assert!(state.is_idle());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_pan_and_drag_are_mutually_exclusive() {
        let (dragging, _) = run(
            GestureState::Idle,
            &[GestureEvent::PointerDown { x: 50.0, target: flu() }],
        );
        let (still_dragging, _) = run(
            dragging.clone(),
            &[GestureEvent::PointerDown { x: 10.0, target: PointerTarget::EmptyGrid }],
        );
        assert_eq!(still_dragging, dragging);

        let (panning, _) = run(
            GestureState::Idle,
            &[GestureEvent::PointerDown { x: 10.0, target: PointerTarget::EmptyGrid }],
        );
        let (still_panning, _) = run(
            panning.clone(),
            &[GestureEvent::PointerDown { x: 50.0, target: flu() }],
        );
        assert_eq!(still_panning, panning);
    }

    #[test]
    fn test_idle_ignores_stray_events() {
        let (state, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerMove { x: 5.0 },
                GestureEvent::PointerUp,
                GestureEvent::PointerLeave,
            ],
        );
        assert!(state.is_idle());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_few_pixel_move_is_a_drag_not_a_click() {
        // 3px at 28px/month is 3 days.
        let (_, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerDown { x: 50.0, target: flu() },
                GestureEvent::PointerMove { x: 53.0 },
                GestureEvent::PointerUp,
            ],
        );
        assert_eq!(
            effects,
            vec![GestureEffect::Commit {
                entry_id: "a".into(),
                range: DateRange::new(d(2024, 1, 13), Some(d(2024, 1, 23))),
            }]
        );
    }

    #[test]
    fn test_double_click_resolves_month_start() {
        // 2022-01-01 origin, 28px months: x = 28 * 14.5 is mid-March 2023.
        let (_, effects) = run(
            GestureState::Idle,
            &[GestureEvent::DoubleClick {
                grid_x: 28.0 * 14.5,
                section: SectionType::Fitness,
            }],
        );
        assert_eq!(
            effects,
            vec![GestureEffect::CreateAt {
                date: d(2023, 3, 1),
                section: SectionType::Fitness,
            }]
        );
    }

    #[test]
    fn test_double_click_at_end_of_month_cell_stays_in_that_month() {
        let (_, effects) = run(
            GestureState::Idle,
            &[GestureEvent::DoubleClick {
                grid_x: 28.0 - 0.1,
                section: SectionType::Diet,
            }],
        );
        assert_eq!(
            effects,
            vec![GestureEffect::CreateAt {
                date: d(2022, 1, 1),
                section: SectionType::Diet,
            }]
        );
    }

    #[test]
    fn test_double_click_ignored_while_panning() {
        let (_, effects) = run(
            GestureState::Idle,
            &[
                GestureEvent::PointerDown { x: 300.0, target: PointerTarget::EmptyGrid },
                GestureEvent::DoubleClick {
                    grid_x: 10.0,
                    section: SectionType::Misc,
                },
            ],
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_resize_start_clamps_to_end() {
        let original = DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 20)));
        let range = preview_range(Grip::ResizeStart, original, 40);
        assert_eq!(range, DateRange::new(d(2024, 1, 20), Some(d(2024, 1, 20))));
    }

    #[test]
    fn test_resize_end_clamps_to_start() {
        let original = DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 20)));
        let range = preview_range(Grip::ResizeEnd, original, -40);
        assert_eq!(range, DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 10))));
    }

    #[test]
    fn test_resize_start_on_point_entry_moves_start_only() {
        let original = DateRange::point(d(2024, 1, 10));
        let range = preview_range(Grip::ResizeStart, original, 5);
        assert_eq!(range, DateRange::point(d(2024, 1, 15)));
    }

    #[test]
    fn test_resize_end_on_point_entry_introduces_end() {
        let original = DateRange::point(d(2024, 1, 10));
        assert_eq!(
            preview_range(Grip::ResizeEnd, original, 6),
            DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 16)))
        );
        assert_eq!(
            preview_range(Grip::ResizeEnd, original, -6),
            DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 10)))
        );
    }

    #[test]
    fn test_move_keeps_point_entries_as_points() {
        let original = DateRange::point(d(2024, 1, 10));
        assert_eq!(
            preview_range(Grip::Move, original, -10),
            DateRange::point(d(2023, 12, 31))
        );
    }
}
