//! Discrete zoom levels for the timeline.
//!
//! A zoom level is an index into a fixed table of month widths, smallest
//! first. Stepping is clamped at both ends; changing the level only changes
//! the month width used by the next layout pass.

use serde::{Deserialize, Serialize};

/// Pixel width of one month at each zoom level.
pub const MONTH_WIDTH_OPTIONS: [f32; 5] = [8.0, 12.0, 18.0, 28.0, 45.0];

pub const DEFAULT_ZOOM_LEVEL: usize = 3;

/// Stored as its bare index; deserializing goes through [`ZoomLevel::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct ZoomLevel(usize);

impl ZoomLevel {
    /// Build a level, clamping out-of-range indices to the widest level.
    pub fn new(index: usize) -> Self {
        Self(index.min(Self::max_index()))
    }

    pub fn max_index() -> usize {
        MONTH_WIDTH_OPTIONS.len() - 1
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn month_width(&self) -> f32 {
        MONTH_WIDTH_OPTIONS[self.0]
    }

    pub fn can_zoom_in(&self) -> bool {
        self.0 < Self::max_index()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.0 > 0
    }

    /// Step to the next wider month. Returns false at the upper bound.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.0 += 1;
        true
    }

    /// Step to the next narrower month. Returns false at the lower bound.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.0 -= 1;
        true
    }
}

impl From<usize> for ZoomLevel {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<ZoomLevel> for usize {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_LEVEL)
    }
}
