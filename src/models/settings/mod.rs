// Settings module
// User configuration persisted as TOML.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::timeline::zoom::DEFAULT_ZOOM_LEVEL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Zoom level the timeline opens with (index into the month-width table).
    pub default_zoom_level: usize,
    pub dark_mode: bool,
    /// Overrides the default location of the health data file.
    pub data_file: Option<PathBuf>,
    /// Number of startup backups of the data file to retain.
    pub backup_keep_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_zoom_level: DEFAULT_ZOOM_LEVEL,
            dark_mode: false,
            data_file: None,
            backup_keep_count: 5,
        }
    }
}
