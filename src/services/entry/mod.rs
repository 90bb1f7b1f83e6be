// Entry service
// Owns the in-memory health data and writes every change through storage.

use chrono::NaiveDate;

use crate::models::entry::{HealthData, TimelineEntry};
use crate::services::storage::{self, StorageError, StorageService};
use crate::utils::date::{add_days, add_months};

/// Months covered by a freshly created entry.
pub const NEW_ENTRY_SPAN_MONTHS: u32 = 2;

/// Default end date offered when creating an entry starting on `start`.
pub fn default_end_date(start: NaiveDate) -> NaiveDate {
    add_days(add_months(start, NEW_ENTRY_SPAN_MONTHS), -1)
}

pub fn add_entry(data: &HealthData, entry: TimelineEntry) -> HealthData {
    let mut entries = data.entries.clone();
    entries.push(entry);
    HealthData { entries, ..data.clone() }
}

/// Replace the entry with the same id. Unknown ids leave the data unchanged.
pub fn update_entry(data: &HealthData, entry: TimelineEntry) -> HealthData {
    let entries = data
        .entries
        .iter()
        .map(|existing| {
            if existing.id == entry.id {
                entry.clone()
            } else {
                existing.clone()
            }
        })
        .collect();
    HealthData { entries, ..data.clone() }
}

pub fn delete_entry(data: &HealthData, id: &str) -> HealthData {
    let entries = data
        .entries
        .iter()
        .filter(|entry| entry.id != id)
        .cloned()
        .collect();
    HealthData { entries, ..data.clone() }
}

pub struct EntryService {
    data: HealthData,
    storage: StorageService,
}

impl EntryService {
    /// Load whatever the storage currently holds.
    pub fn load(storage: StorageService) -> Self {
        let data = storage.load();
        Self { data, storage }
    }

    pub fn new(storage: StorageService, data: HealthData) -> Self {
        Self { data, storage }
    }

    pub fn data(&self) -> &HealthData {
        &self.data
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.data.entries
    }

    pub fn find(&self, id: &str) -> Option<&TimelineEntry> {
        self.data.find(id)
    }

    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    pub fn add(&mut self, entry: TimelineEntry) -> Result<(), StorageError> {
        log::info!("Adding entry '{}' to {}", entry.title, entry.section_type);
        let next = add_entry(&self.data, entry);
        self.replace(next)
    }

    pub fn update(&mut self, entry: TimelineEntry) -> Result<(), StorageError> {
        if self.find(&entry.id).is_none() {
            log::warn!("Ignoring update for unknown entry {}", entry.id);
            return Ok(());
        }
        let next = update_entry(&self.data, entry);
        self.replace(next)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StorageError> {
        log::info!("Deleting entry {}", id);
        let next = delete_entry(&self.data, id);
        self.replace(next)
    }

    /// Drop every entry and remove the data file.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.data = HealthData::default();
        self.storage.clear()
    }

    /// Replace all data with an imported document. Returns the number of entries imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize, StorageError> {
        let imported = storage::import_json(json)?;
        let count = imported.entries.len();
        self.replace(imported)?;
        log::info!("Imported {} entries", count);
        Ok(count)
    }

    pub fn export_json(&self) -> Result<String, StorageError> {
        storage::export_json(&self.data)
    }

    fn replace(&mut self, next: HealthData) -> Result<(), StorageError> {
        self.data = next;
        self.storage.save(&self.data).map_err(|err| {
            log::error!("Failed to save health data: {}", err);
            err
        })
    }
}
