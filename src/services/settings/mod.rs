// Settings service
// Loads and saves the TOML configuration and resolves application file locations.

use anyhow::{Context, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::Settings;
use crate::services::storage::DATA_FILE_NAME;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform configuration file.
    pub fn from_default_location() -> Self {
        Self::new(default_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file is missing or invalid.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings: {:#}", err);
                Settings::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings = toml::from_str(&text)
            .with_context(|| format!("failed to parse settings in {}", self.path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
        }
        let text = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

/// Where the health data file lives: the settings override, else the default location.
pub fn resolve_data_path(settings: &Settings) -> PathBuf {
    settings
        .data_file
        .clone()
        .unwrap_or_else(default_data_path)
}

#[cfg(debug_assertions)]
pub fn default_settings_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE_NAME)
}

#[cfg(not(debug_assertions))]
pub fn default_settings_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILE_NAME),
        None => PathBuf::from(SETTINGS_FILE_NAME),
    }
}

#[cfg(debug_assertions)]
pub fn default_data_path() -> PathBuf {
    PathBuf::from(DATA_FILE_NAME)
}

#[cfg(not(debug_assertions))]
pub fn default_data_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(DATA_FILE_NAME),
        None => PathBuf::from(DATA_FILE_NAME),
    }
}

#[cfg(not(debug_assertions))]
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "HealthTimeline", "HealthTimeline")
}
