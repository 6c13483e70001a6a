//! Backup settings
//!
//! An optional `backup.json` in the base directory can change the default
//! source, destination and retention count. Command-line flags win over it.

use std::path::PathBuf;

use serde::Deserialize;

use super::paths::BackupPaths;
use crate::backup::{BackupJob, RetentionPolicy, DEFAULT_KEEP};
use crate::error::{BackupError, BackupResult};

/// Backup settings read from `backup.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Database file to back up (relative to the base directory)
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Backup directory (relative to the base directory)
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Number of backups to keep
    #[serde(default = "default_keep")]
    pub keep: u32,
}

fn default_keep() -> u32 {
    DEFAULT_KEEP
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
            keep: default_keep(),
        }
    }
}

/// Values given explicitly for this run, each overriding the settings
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub keep: Option<u32>,
}

impl Settings {
    /// Load settings from disk, or use the defaults if the file doesn't exist
    pub fn load_or_default(paths: &BackupPaths) -> Result<Self, BackupError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
            BackupError::Io(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            BackupError::Config(format!(
                "Failed to parse settings file {}: {}",
                settings_path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %settings_path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Combine overrides, these settings and the built-in defaults into a job
    pub fn resolve_job(&self, paths: &BackupPaths, overrides: Overrides) -> BackupResult<BackupJob> {
        let source = overrides
            .source
            .or_else(|| self.source.as_deref().map(|p| paths.absolutize(p)))
            .unwrap_or_else(|| paths.database_file());

        let destination = overrides
            .destination
            .or_else(|| self.destination.as_deref().map(|p| paths.absolutize(p)))
            .unwrap_or_else(|| paths.backup_dir());

        let retention = RetentionPolicy::new(overrides.keep.unwrap_or(self.keep))?;

        Ok(BackupJob {
            source,
            destination,
            retention,
        })
    }
}
