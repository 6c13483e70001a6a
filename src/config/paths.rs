//! Default locations of the database, its backups and `backup.json`
//!
//! Everything sits under the AccHelper base directory, which is taken from
//! `--base-dir`, then `ACCHELPER_BASE_DIR`, then the working directory.

use std::path::{Path, PathBuf};

use crate::error::BackupError;

/// Environment variable overriding the base directory
pub const BASE_DIR_ENV: &str = "ACCHELPER_BASE_DIR";

/// Default paths derived from the AccHelper base directory
#[derive(Debug, Clone)]
pub struct BackupPaths {
    /// Base directory of the AccHelper installation
    base_dir: PathBuf,
}

impl BackupPaths {
    /// Uses `ACCHELPER_BASE_DIR` when set, otherwise the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, BackupError> {
        let base_dir = match std::env::var_os(BASE_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => current_dir()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BackupPaths with an explicit base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Use `base_dir` if given, otherwise fall back to [`BackupPaths::new`]
    pub fn resolve(base_dir: Option<PathBuf>) -> Result<Self, BackupError> {
        match base_dir {
            Some(dir) => Ok(Self::with_base_dir(dir)),
            None => Self::new(),
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default database path (<base>/data/acchelper.db)
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("acchelper.db")
    }

    /// Get the default backup directory (<base>/data/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir().join("backups")
    }

    /// Get the path to the optional settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("backup.json")
    }

    /// Resolve a configured path: relative paths are taken from the base directory
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn current_dir() -> Result<PathBuf, BackupError> {
    std::env::current_dir()
        .map_err(|e| BackupError::Config(format!("Could not determine current directory: {}", e)))
}
