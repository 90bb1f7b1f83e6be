use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::storage;

const BACKUP_PREFIX: &str = "health-data_backup_";
const BACKUP_EXTENSION: &str = "json";

/// Information about a backup file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub filename: String,
    pub modified_at: DateTime<Local>,
    pub size_bytes: u64,
}

impl BackupInfo {
    fn from_path(path: PathBuf) -> Result<Self> {
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to get metadata for {:?}", path))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let modified_at = metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for {:?}", path))?;

        Ok(BackupInfo {
            path,
            filename,
            modified_at: DateTime::<Local>::from(modified_at),
            size_bytes: metadata.len(),
        })
    }

    fn is_backup_file(path: &Path) -> bool {
        let name_matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |name| name.starts_with(BACKUP_PREFIX));
        path.is_file()
            && name_matches
            && path.extension().and_then(|s| s.to_str()) == Some(BACKUP_EXTENSION)
    }
}

/// Copies of the health data file taken on startup
pub struct BackupService;

impl BackupService {
    /// Backups live next to the data file, in a `backups` directory
    pub fn backup_dir_for(data_path: &Path) -> PathBuf {
        data_path
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"))
    }

    /// Copy the data file into `backup_dir` under a timestamped name
    pub fn create_backup(data_path: &Path, backup_dir: &Path) -> Result<PathBuf> {
        if !data_path.exists() {
            anyhow::bail!("Data file does not exist: {:?}", data_path);
        }

        fs::create_dir_all(backup_dir)
            .with_context(|| format!("Failed to create backup directory: {:?}", backup_dir))?;

        // Millisecond precision keeps names unique and sortable
        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S%3f");
        let backup_path =
            backup_dir.join(format!("{}{}.{}", BACKUP_PREFIX, timestamp, BACKUP_EXTENSION));

        fs::copy(data_path, &backup_path).with_context(|| {
            format!("Failed to copy data from {:?} to {:?}", data_path, backup_path)
        })?;

        log::info!("Created backup: {:?}", backup_path);
        Ok(backup_path)
    }

    /// Restore the data file from a backup. The backup must parse as health data.
    pub fn restore_backup(backup_path: &Path, data_path: &Path) -> Result<()> {
        if !backup_path.exists() {
            anyhow::bail!("Backup file does not exist: {:?}", backup_path);
        }

        let json = fs::read_to_string(backup_path)
            .with_context(|| format!("Failed to read backup {:?}", backup_path))?;
        storage::import_json(&json)
            .with_context(|| format!("Backup {:?} is not valid health data", backup_path))?;

        if data_path.exists() {
            let safety_backup = data_path.with_extension("json.before_restore");
            fs::copy(data_path, &safety_backup)
                .context("Failed to create safety backup before restore")?;
            log::info!("Created safety backup: {:?}", safety_backup);
        }

        if let Some(parent) = data_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {:?}", parent))?;
        }

        fs::copy(backup_path, data_path).with_context(|| {
            format!("Failed to restore backup from {:?} to {:?}", backup_path, data_path)
        })?;

        log::info!("Restored backup from {:?} to {:?}", backup_path, data_path);
        Ok(())
    }

    /// Backups in `backup_dir`, newest first
    pub fn list_backups(backup_dir: &Path) -> Result<Vec<BackupInfo>> {
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(backup_dir)
            .with_context(|| format!("Failed to read backup directory: {:?}", backup_dir))?;

        let mut backups = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if BackupInfo::is_backup_file(&path) {
                if let Ok(info) = BackupInfo::from_path(path) {
                    backups.push(info);
                }
            }
        }

        // Names embed the timestamp
        backups.sort_by(|a, b| b.filename.cmp(&a.filename));
        Ok(backups)
    }

    /// Delete all but the `keep_count` most recent backups. Returns how many were removed.
    pub fn cleanup_old_backups(backup_dir: &Path, keep_count: usize) -> Result<usize> {
        let mut backups = Self::list_backups(backup_dir)?;
        if backups.len() <= keep_count {
            return Ok(0);
        }

        let to_remove = backups.split_off(keep_count);
        let mut removed = 0;
        for backup in to_remove {
            if let Err(e) = fs::remove_file(&backup.path) {
                log::warn!("Failed to delete old backup {:?}: {}", backup.path, e);
            } else {
                log::info!("Deleted old backup: {:?}", backup.path);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Back up the data file (if any) and prune old backups
    pub fn auto_backup_on_startup(data_path: &Path, keep_count: usize) -> Result<Option<PathBuf>> {
        if !data_path.exists() {
            log::info!("Skipping auto-backup: data file does not exist yet");
            return Ok(None);
        }

        let backup_dir = Self::backup_dir_for(data_path);
        let backup_path = Self::create_backup(data_path, &backup_dir)?;

        let removed = Self::cleanup_old_backups(&backup_dir, keep_count)?;
        if removed > 0 {
            log::info!("Cleaned up {} old backup(s)", removed);
        }

        Ok(Some(backup_path))
    }

    pub fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{} bytes", bytes)
        }
    }
}
