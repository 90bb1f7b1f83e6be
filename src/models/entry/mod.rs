// Entry module
// Dated health records and the persisted document that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::section::SectionType;

/// Current on-disk document version. Loaded and imported data is normalized to it.
pub const CURRENT_VERSION: u32 = 1;

/// Opaque identifier, stable for the lifetime of an entry.
pub type EntryId = String;

/// Inclusive calendar-day range. `end == None` is a point-in-time event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn point(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Last occupied day; a point event occupies its start day only.
    pub fn last_day(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    /// Two ranges overlap unless one ends strictly before the other starts.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.last_day() < other.start || self.start > other.last_day())
    }

    pub fn is_inverted(&self) -> bool {
        self.end.map_or(false, |end| end < self.start)
    }
}

/// One dated record on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: EntryId,
    pub section_type: SectionType,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TimelineEntry {
    /// Create a point entry with a freshly generated id.
    pub fn new(section_type: SectionType, start_date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            id: generate_entry_id(),
            section_type,
            start_date,
            end_date: None,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<EntryId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Copy of this entry with only its dates replaced.
    pub fn with_date_range(&self, range: DateRange) -> Self {
        Self {
            start_date: range.start,
            end_date: range.end,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntryValidationError::EmptyTitle);
        }
        if self.date_range().is_inverted() {
            return Err(EntryValidationError::EndBeforeStart);
        }
        Ok(())
    }
}

/// Validation errors raised by the entry dialog before saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    EndBeforeStart,
}

impl std::fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title is required"),
            Self::EndBeforeStart => write!(f, "End date cannot be before the start date"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

pub fn generate_entry_id() -> EntryId {
    uuid::Uuid::new_v4().to_string()
}

/// The persisted document: `{version, entries}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    pub version: u32,
    pub entries: Vec<TimelineEntry>,
}

impl Default for HealthData {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            entries: Vec::new(),
        }
    }
}

impl HealthData {
    pub fn new(entries: Vec<TimelineEntry>) -> Self {
        Self {
            version: CURRENT_VERSION,
            entries,
        }
    }

    pub fn find(&self, id: &str) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}
