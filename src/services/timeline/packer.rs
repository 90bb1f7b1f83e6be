//! First-fit row packing of entries within one section.
//!
//! Entries are sorted by start date (stable for ties) and each is placed in
//! the topmost row where it overlaps nothing. Greedy, so not always minimal,
//! but rows never contain overlapping entries.

use std::collections::HashMap;

use crate::models::entry::{EntryId, TimelineEntry};
use crate::models::section::{SectionType, SECTION_ORDER};

/// Pack one section's entries into rows of mutually non-overlapping entries.
pub fn pack_rows<'a, I>(entries: I) -> Vec<Vec<&'a TimelineEntry>>
where
    I: IntoIterator<Item = &'a TimelineEntry>,
{
    let mut sorted: Vec<&TimelineEntry> = entries.into_iter().collect();
    sorted.sort_by_key(|entry| entry.start_date);

    let mut rows: Vec<Vec<&TimelineEntry>> = Vec::new();
    for entry in sorted {
        let range = entry.date_range();
        let free_row = rows.iter_mut().find(|row| {
            row.iter()
                .all(|placed| !placed.date_range().overlaps(&range))
        });
        match free_row {
            Some(row) => row.push(entry),
            None => rows.push(vec![entry]),
        }
    }
    rows
}

/// Row index of every entry, plus the row count of every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRows {
    row_of: HashMap<EntryId, usize>,
    row_counts: HashMap<SectionType, usize>,
}

impl SectionRows {
    /// Pack every section of `entries` independently.
    pub fn pack(entries: &[TimelineEntry]) -> Self {
        let mut rows = SectionRows::default();
        for section in SECTION_ORDER {
            let packed = pack_rows(entries.iter().filter(|e| e.section_type == section));
            rows.row_counts.insert(section, packed.len());
            for (row_index, row) in packed.into_iter().enumerate() {
                for entry in row {
                    rows.row_of.insert(entry.id.clone(), row_index);
                }
            }
        }
        rows
    }

    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.row_of.get(id).copied()
    }

    /// Number of occupied rows in `section` (0 when empty).
    pub fn row_count(&self, section: SectionType) -> usize {
        self.row_counts.get(&section).copied().unwrap_or(0)
    }
}
