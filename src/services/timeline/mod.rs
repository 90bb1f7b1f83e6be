//! Timeline layout and direct-manipulation engine.
//!
//! [`ViewState`] is the single piece of ephemeral UI state (zoom, gesture,
//! scroll offset). Rendering surfaces call [`layout::compute_layout`] with it
//! every frame and feed pointer input through [`ViewState::dispatch`], which
//! returns the requests the entry owner has to act on.

pub mod gesture;
pub mod layout;
pub mod mapper;
pub mod packer;
pub mod zoom;

use chrono::NaiveDate;

use self::gesture::{
    transition, DragState, GestureContext, GestureEffect, GestureEvent, GestureState, PanState,
};
use self::layout::TimelineLayout;
use self::packer::SectionRows;
use self::zoom::ZoomLevel;
use crate::models::entry::{DateRange, TimelineEntry};
use crate::models::section::SectionType;

/// Collaborator notified of completed gestures.
pub trait TimelineObserver {
    /// A drag finished; `entry` carries the new dates and is otherwise unchanged.
    fn on_entry_commit(&mut self, entry: TimelineEntry);
    /// An entry was clicked without being dragged.
    fn on_entry_activate(&mut self, entry: &TimelineEntry);
    /// An empty cell was double-clicked.
    fn on_cell_activate(&mut self, date: NaiveDate, section: SectionType);
}

/// Outcome of a dispatched pointer event, with entry ids resolved to entries.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    CommitEntry(TimelineEntry),
    ActivateEntry(TimelineEntry),
    ActivateCell { date: NaiveDate, section: SectionType },
}

impl TimelineAction {
    pub fn deliver(self, observer: &mut impl TimelineObserver) {
        match self {
            TimelineAction::CommitEntry(entry) => observer.on_entry_commit(entry),
            TimelineAction::ActivateEntry(entry) => observer.on_entry_activate(&entry),
            TimelineAction::ActivateCell { date, section } => observer.on_cell_activate(date, section),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub zoom: ZoomLevel,
    pub gesture: GestureState,
    /// Horizontal scroll offset of the grid in pixels.
    pub scroll_offset: f32,
    frozen_rows: Option<SectionRows>,
}

impl ViewState {
    pub fn new(zoom: ZoomLevel) -> Self {
        Self {
            zoom,
            ..Self::default()
        }
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        match &self.gesture {
            GestureState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn drag_preview(&self) -> Option<DateRange> {
        self.drag_state().and_then(|drag| drag.preview)
    }

    pub fn pan_state(&self) -> Option<&PanState> {
        match &self.gesture {
            GestureState::Panning(pan) => Some(pan),
            _ => None,
        }
    }

    /// Row assignment pinned for the duration of a drag.
    pub fn frozen_rows(&self) -> Option<&SectionRows> {
        self.frozen_rows.as_ref()
    }

    pub fn freeze_rows(&mut self, entries: &[TimelineEntry]) {
        self.frozen_rows = Some(SectionRows::pack(entries));
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom.zoom_out()
    }

    /// Feed one pointer event through the gesture controller.
    ///
    /// `layout` must be the layout the event coordinates were taken from.
    pub fn dispatch(
        &mut self,
        event: &GestureEvent,
        entries: &[TimelineEntry],
        layout: &TimelineLayout,
    ) -> Vec<TimelineAction> {
        let ctx = GestureContext {
            mapper: layout.mapper(),
            scroll_offset: self.scroll_offset,
        };
        let was_dragging = self.gesture.is_dragging();
        let next = transition(&self.gesture, event, &ctx);
        self.gesture = next.state;

        match (was_dragging, self.gesture.is_dragging()) {
            (false, true) => self.freeze_rows(entries),
            (true, false) => self.frozen_rows = None,
            _ => {}
        }

        let mut actions = Vec::new();
        for effect in next.effects {
            match effect {
                GestureEffect::ScrollTo(offset) => self.scroll_offset = offset,
                GestureEffect::Commit { entry_id, range } => {
                    match entries.iter().find(|entry| entry.id == entry_id) {
                        Some(entry) => {
                            actions.push(TimelineAction::CommitEntry(entry.with_date_range(range)))
                        }
                        None => log::warn!("Dropping drag commit for unknown entry {}", entry_id),
                    }
                }
                GestureEffect::Activate { entry_id } => {
                    if let Some(entry) = entries.iter().find(|entry| entry.id == entry_id) {
                        actions.push(TimelineAction::ActivateEntry(entry.clone()));
                    }
                }
                GestureEffect::CreateAt { date, section } => {
                    actions.push(TimelineAction::ActivateCell { date, section })
                }
            }
        }
        actions
    }
}
