// Integration tests for entry persistence, import/export and startup backups

mod fixtures;

use fixtures::entries::{flu, sample, weigh_in};
use fixtures::{d, today};
use health_timeline::models::entry::{HealthData, CURRENT_VERSION};
use health_timeline::services::backup::BackupService;
use health_timeline::services::entry::EntryService;
use health_timeline::services::report::export_text;
use health_timeline::services::storage::{StorageError, StorageService, DATA_FILE_NAME};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> EntryService {
    EntryService::load(StorageService::new(dir.path().join(DATA_FILE_NAME)))
}

#[test]
fn test_changes_survive_reload() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    assert!(service.entries().is_empty());

    for entry in sample() {
        service.add(entry).unwrap();
    }
    let moved = flu().with_date_range(flu().date_range());
    service.update(moved.with_description("Recovered")).unwrap();
    service.delete("weigh").unwrap();

    let reloaded = service_in(&dir);
    assert_eq!(reloaded.entries().len(), 3);
    assert_eq!(
        reloaded.find("flu").unwrap().description.as_deref(),
        Some("Recovered")
    );
    assert!(reloaded.find("weigh").is_none());
    assert_eq!(reloaded.data(), service.data());
}

#[test]
fn test_persisted_document_shape() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    service.add(weigh_in()).unwrap();
    service.add(flu()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(DATA_FILE_NAME)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["version"], CURRENT_VERSION);

    let point = &json["entries"][0];
    assert_eq!(point["sectionType"], "bodyComposition");
    assert_eq!(point["startDate"], "2024-03-01");
    assert!(point.get("endDate").is_none());
    assert!(point.get("description").is_none());

    let range = &json["entries"][1];
    assert_eq!(range["endDate"], "2024-01-20");
    assert_eq!(range["description"], "Fever, stayed home");
}

#[test]
fn test_export_then_import_into_fresh_store() {
    let source_dir = TempDir::new().unwrap();
    let mut source = service_in(&source_dir);
    for entry in sample() {
        source.add(entry).unwrap();
    }
    let exported = source.export_json().unwrap();

    let target_dir = TempDir::new().unwrap();
    let mut target = service_in(&target_dir);
    target.add(flu().with_id("stale")).unwrap();

    let count = target.import_json(&exported).unwrap();
    assert_eq!(count, 4);
    assert!(target.find("stale").is_none());
    assert_eq!(target.data(), source.data());
}

#[test]
fn test_import_keeps_data_on_rejection() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    service.add(flu()).unwrap();

    let err = service.import_json(r#"{"version": 1, "entries": {}}"#).unwrap_err();
    assert!(matches!(err, StorageError::InvalidFormat(_)));
    let err = service.import_json("not json").unwrap_err();
    assert!(matches!(err, StorageError::Parse(_)));

    assert_eq!(service.entries(), &[flu()]);
    assert_eq!(service_in(&dir).entries(), &[flu()]);
}

#[test]
fn test_import_normalizes_version_and_skips_bad_entries() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    let json = r#"{
        "version": 7,
        "entries": [
            {"id": "a", "sectionType": "diet", "startDate": "2023-02-01", "title": "Low carb"},
            {"id": "b", "sectionType": "unknown", "startDate": "2023-02-01", "title": "Bad section"},
            {"id": "c", "sectionType": "misc", "title": "No start"}
        ]
    }"#;

    assert_eq!(service.import_json(json).unwrap(), 1);
    assert_eq!(service.data().version, CURRENT_VERSION);
    assert_eq!(service.entries()[0].start_date, d(2023, 2, 1));
}

#[test]
fn test_corrupt_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(DATA_FILE_NAME), "{ truncated").unwrap();
    let service = service_in(&dir);
    assert_eq!(service.data(), &HealthData::default());
}

#[test]
fn test_clear_removes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DATA_FILE_NAME);
    let mut service = service_in(&dir);
    service.add(flu()).unwrap();
    assert!(path.exists());

    service.clear().unwrap();
    assert!(service.entries().is_empty());
    assert!(!path.exists());
    // Clearing twice is fine.
    service.clear().unwrap();
}

#[test]
fn test_startup_backup_captures_current_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DATA_FILE_NAME);
    assert_eq!(BackupService::auto_backup_on_startup(&path, 5).unwrap(), None);

    let mut service = service_in(&dir);
    for entry in sample() {
        service.add(entry).unwrap();
    }
    let backup = BackupService::auto_backup_on_startup(&path, 5)
        .unwrap()
        .expect("data file exists");

    let restored = EntryService::load(StorageService::new(backup));
    assert_eq!(restored.data(), service.data());
}

#[test]
fn test_text_report_lists_every_entry() {
    let data = HealthData::new(sample());
    let report = export_text(&data, today());
    for entry in sample() {
        assert!(report.contains(&entry.title), "{}", entry.title);
    }
    assert!(report.contains("4 entries"));
}
