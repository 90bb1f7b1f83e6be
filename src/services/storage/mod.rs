// Storage service
// JSON persistence of the health data document plus import/export helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use crate::models::entry::{HealthData, TimelineEntry, CURRENT_VERSION};
use crate::utils::date::format_iso_date;

/// File name of the data document inside the application data directory.
pub const DATA_FILE_NAME: &str = "health-data.json";

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid health data: {0}")]
    InvalidFormat(String),
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads and writes the data document at a fixed path.
#[derive(Debug, Clone)]
pub struct StorageService {
    path: PathBuf,
}

impl StorageService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, falling back to empty data when the file is
    /// missing or unreadable.
    pub fn load(&self) -> HealthData {
        match self.try_load() {
            Ok(data) => {
                log::info!(
                    "Loaded {} entries from {}",
                    data.entries.len(),
                    self.path.display()
                );
                data
            }
            Err(err) => {
                log::error!("Failed to load health data: {}", err);
                HealthData::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<HealthData, StorageError> {
        if !self.path.exists() {
            return Ok(HealthData::default());
        }
        let json = fs::read_to_string(&self.path).map_err(|err| StorageError::io(&self.path, err))?;
        import_json(&json)
    }

    pub fn save(&self, data: &HealthData) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
            }
        }
        let json = export_json(data)?;
        fs::write(&self.path, json).map_err(|err| StorageError::io(&self.path, err))?;
        log::debug!("Saved {} entries to {}", data.entries.len(), self.path.display());
        Ok(())
    }

    /// Remove the data file. Succeeds when there is nothing to remove.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Removed health data file {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io(&self.path, err)),
        }
    }
}

/// Pretty-printed `{version, entries}` document.
pub fn export_json(data: &HealthData) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Parse an exported document. Only `entries` is required to be a list;
/// entries that do not deserialize are skipped and the version is reset
/// to the current one.
pub fn import_json(json: &str) -> Result<HealthData, StorageError> {
    let document: Value = serde_json::from_str(json)?;
    let entries = document
        .get("entries")
        .and_then(Value::as_array)
        .ok_or_else(|| StorageError::InvalidFormat("`entries` must be a list".to_string()))?;

    let mut parsed = Vec::with_capacity(entries.len());
    for (index, value) in entries.iter().enumerate() {
        match serde_json::from_value::<TimelineEntry>(value.clone()) {
            Ok(entry) => parsed.push(entry),
            Err(err) => log::warn!("Skipping malformed entry #{}: {}", index, err),
        }
    }

    Ok(HealthData {
        version: CURRENT_VERSION,
        entries: parsed,
    })
}

/// Suggested file name for an export made on `today`, e.g. `health-map-export-2024-06-15.json`.
pub fn default_export_file_name(today: NaiveDate, extension: &str) -> String {
    format!("health-map-export-{}.{}", format_iso_date(today), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionType;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> HealthData {
        HealthData::new(vec![
            TimelineEntry::new(SectionType::Symptom, d(2024, 1, 10), "Flu")
                .with_id("a")
                .with_end_date(d(2024, 1, 20)),
            TimelineEntry::new(SectionType::Medication, d(2024, 2, 1), "Ibuprofen")
                .with_id("b")
                .with_description("200mg"),
        ])
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let storage = StorageService::new(dir.path().join("nested").join(DATA_FILE_NAME));
        storage.save(&sample()).unwrap();
        assert_eq!(storage.load(), sample());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let storage = StorageService::new(dir.path().join(DATA_FILE_NAME));
        assert_eq!(storage.try_load().unwrap(), HealthData::default());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let storage = StorageService::new(&path);
        assert!(matches!(storage.try_load(), Err(StorageError::Parse(_))));
        assert_eq!(storage.load(), HealthData::default());
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = StorageService::new(dir.path().join(DATA_FILE_NAME));
        storage.save(&sample()).unwrap();
        storage.clear().unwrap();
        assert!(!storage.path().exists());
        storage.clear().unwrap();
    }

    #[test]
    fn test_export_uses_camel_case_and_omits_absent_fields() {
        let json = export_json(&sample()).unwrap();
        assert!(json.contains("\"version\": 1"));
        assert!(json.contains("\"sectionType\": \"symptom\""));
        assert!(json.contains("\"startDate\": \"2024-01-10\""));
        assert!(json.contains("\"endDate\": \"2024-01-20\""));
        assert_eq!(json.matches("endDate").count(), 1);
        assert_eq!(json.matches("description").count(), 1);
    }

    #[test]
    fn test_import_normalizes_version() {
        let json = r#"{"version": 7, "entries": []}"#;
        assert_eq!(import_json(json).unwrap().version, CURRENT_VERSION);
    }

    #[test]
    fn test_import_rejects_missing_entries_list() {
        assert!(matches!(
            import_json(r#"{"version": 1}"#),
            Err(StorageError::InvalidFormat(_))
        ));
        assert!(matches!(
            import_json(r#"{"entries": {}}"#),
            Err(StorageError::InvalidFormat(_))
        ));
        assert!(matches!(import_json("[]"), Err(StorageError::InvalidFormat(_))));
        assert!(matches!(import_json("nope"), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_import_skips_malformed_entries() {
        let json = r#"{
            "entries": [
                {"id": "ok", "sectionType": "diet", "startDate": "2024-03-01", "title": "Keto"},
                {"id": "bad-date", "sectionType": "diet", "startDate": "March", "title": "x"},
                {"id": "bad-section", "sectionType": "sleep", "startDate": "2024-03-01", "title": "x"}
            ]
        }"#;
        let data = import_json(json).unwrap();
        assert_eq!(data.entries.len(), 1);
        assert_eq!(data.entries[0].id, "ok");
        assert_eq!(data.entries[0].section_type, SectionType::Diet);
    }

    #[test]
    fn test_default_export_file_name() {
        assert_eq!(
            default_export_file_name(d(2024, 6, 15), "json"),
            "health-map-export-2024-06-15.json"
        );
    }
}
