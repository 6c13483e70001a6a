//! Filesystem access for the backup routine
//!
//! The routine talks to the filesystem only through [`BackupFs`], so its
//! behaviour can be exercised against an in-memory implementation.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

use crate::error::{BackupError, BackupResult};

/// The filesystem operations a backup run needs
pub trait BackupFs {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> BackupResult<()>;

    /// Copy file contents, permission bits and access/modification times.
    /// Returns the number of bytes copied.
    fn copy_with_metadata(&self, from: &Path, to: &Path) -> BackupResult<u64>;

    /// Names of the regular files in `dir`; empty if `dir` does not exist
    fn list_files(&self, dir: &Path) -> BackupResult<Vec<String>>;

    /// Delete a single file
    fn remove_file(&self, path: &Path) -> BackupResult<()>;
}

/// [`BackupFs`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl BackupFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> BackupResult<()> {
        fs::create_dir_all(path).map_err(|e| {
            BackupError::Io(format!(
                "Failed to create backup directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> BackupResult<u64> {
        let metadata = fs::metadata(from).map_err(|e| {
            BackupError::Io(format!("Failed to read metadata of {}: {}", from.display(), e))
        })?;

        // Checked before the destination exists, so a failure leaves no stray backup
        if !metadata.is_file() {
            return Err(BackupError::Io(format!(
                "Failed to copy {}: not a regular file",
                from.display()
            )));
        }

        let mut reader = File::open(from)
            .map_err(|e| BackupError::Io(format!("Failed to open {}: {}", from.display(), e)))?;
        let mut writer = File::create(to)
            .map_err(|e| BackupError::Io(format!("Failed to create {}: {}", to.display(), e)))?;

        let bytes = io::copy(&mut reader, &mut writer).map_err(|e| {
            BackupError::Io(format!(
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;

        // Times go on the open handle before permissions may make the copy read-only
        let mut times = FileTimes::new();
        if let Ok(modified) = metadata.modified() {
            times = times.set_modified(modified);
        }
        if let Ok(accessed) = metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        writer.set_times(times).map_err(|e| {
            BackupError::Io(format!("Failed to set file times on {}: {}", to.display(), e))
        })?;
        drop(writer);

        fs::set_permissions(to, metadata.permissions()).map_err(|e| {
            BackupError::Io(format!("Failed to set permissions on {}: {}", to.display(), e))
        })?;

        Ok(bytes)
    }

    fn list_files(&self, dir: &Path) -> BackupResult<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| {
            BackupError::Io(format!("Failed to read backup directory {}: {}", dir.display(), e))
        })? {
            let entry = entry.map_err(|e| {
                BackupError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if !entry.path().is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!(name = ?raw, "Skipping non UTF-8 file name"),
            }
        }

        Ok(names)
    }

    fn remove_file(&self, path: &Path) -> BackupResult<()> {
        fs::remove_file(path).map_err(|e| {
            BackupError::Io(format!("Failed to delete old backup {}: {}", path.display(), e))
        })
    }
}
