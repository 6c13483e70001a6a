//! Backup manager
//!
//! Copies the source database into the backup directory under a timestamped
//! name, then deletes the oldest backups beyond the retention count.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::error::BackupResult;

use super::fs::{BackupFs, LocalFs};
use super::naming::BackupPattern;
use super::retention::{BackupSet, RetentionPolicy};

/// Fully resolved inputs of one backup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupJob {
    /// Database file to back up
    pub source: PathBuf,
    /// Directory holding the backups
    pub destination: PathBuf,
    /// How many backups to keep
    pub retention: RetentionPolicy,
}

/// Something the backup run did, reported as soon as it happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupEvent {
    /// The source file does not exist; nothing else happens
    SourceMissing { source: PathBuf },
    /// A new backup was written
    Created { path: PathBuf, bytes: u64 },
    /// An old backup was deleted
    Removed { name: String },
    /// Number of backups left in the destination
    Total { count: usize },
}

/// Summary of a finished backup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupReport {
    /// Path of the new backup, `None` when the source was missing
    pub created: Option<PathBuf>,
    /// Names of deleted backups, oldest first
    pub removed: Vec<String>,
    /// Backups remaining after pruning
    pub total: usize,
}

/// What a run would do, computed without touching the filesystem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupPlan {
    /// Path the backup would be written to, `None` when the source is missing
    pub backup_path: Option<PathBuf>,
    /// Whether that path already holds a backup from the same second
    pub overwrites: bool,
    /// Backups that would be deleted, oldest first
    pub removals: Vec<String>,
    /// Backups that would remain
    pub total: usize,
}

/// Runs backups for one job
pub struct BackupManager<F = LocalFs> {
    job: BackupJob,
    fs: F,
}

impl BackupManager<LocalFs> {
    /// Create a manager working on the local filesystem
    pub fn new(job: BackupJob) -> Self {
        Self::with_fs(job, LocalFs)
    }
}

impl<F: BackupFs> BackupManager<F> {
    /// Create a manager using a custom filesystem implementation
    pub fn with_fs(job: BackupJob, fs: F) -> Self {
        Self { job, fs }
    }

    pub fn job(&self) -> &BackupJob {
        &self.job
    }

    /// Back up the source now and prune old backups
    pub fn run(&self) -> BackupResult<BackupReport> {
        self.run_at(Local::now().naive_local(), |_| {})
    }

    /// Back up the source as of `now`, calling `on_event` after each step
    ///
    /// Errors are not recovered: if deleting an old backup fails, the run
    /// stops there and backups removed before it stay removed.
    pub fn run_at<E>(&self, now: NaiveDateTime, mut on_event: E) -> BackupResult<BackupReport>
    where
        E: FnMut(&BackupEvent),
    {
        let job = &self.job;

        if !self.fs.exists(&job.source) {
            tracing::info!(source = %job.source.display(), "Source database missing, skipping backup");
            on_event(&BackupEvent::SourceMissing {
                source: job.source.clone(),
            });
            return Ok(BackupReport::default());
        }

        let pattern = BackupPattern::for_source(&job.source)?;

        self.fs.create_dir_all(&job.destination)?;

        let backup_path = job.destination.join(pattern.file_name_at(now));
        if self.fs.exists(&backup_path) {
            tracing::warn!(
                path = %backup_path.display(),
                "Backup from the same second already exists and will be overwritten"
            );
        }

        let bytes = self.fs.copy_with_metadata(&job.source, &backup_path)?;
        tracing::debug!(path = %backup_path.display(), bytes, "Backup written");
        on_event(&BackupEvent::Created {
            path: backup_path.clone(),
            bytes,
        });

        let set = self.backup_set(&pattern)?;
        let mut removed = Vec::new();
        for entry in job.retention.expired(&set) {
            self.fs.remove_file(&job.destination.join(&entry.name))?;
            tracing::debug!(name = %entry.name, "Old backup removed");
            on_event(&BackupEvent::Removed {
                name: entry.name.clone(),
            });
            removed.push(entry.name.clone());
        }

        let total = self.backup_set(&pattern)?.len();
        on_event(&BackupEvent::Total { count: total });

        Ok(BackupReport {
            created: Some(backup_path),
            removed,
            total,
        })
    }

    /// Work out what [`run_at`](Self::run_at) would do, without side effects
    pub fn plan_at(&self, now: NaiveDateTime) -> BackupResult<BackupPlan> {
        let job = &self.job;

        if !self.fs.exists(&job.source) {
            return Ok(BackupPlan::default());
        }

        let pattern = BackupPattern::for_source(&job.source)?;
        let name = pattern.file_name_at(now);
        let backup_path = job.destination.join(&name);
        let overwrites = self.fs.exists(&backup_path);

        let mut set = self.backup_set(&pattern)?;
        set.insert(name);

        let removals = job
            .retention
            .expired(&set)
            .iter()
            .map(|entry| entry.name.clone())
            .collect();

        Ok(BackupPlan {
            backup_path: Some(backup_path),
            overwrites,
            removals,
            total: job.retention.retained_count(&set),
        })
    }

    fn backup_set(&self, pattern: &BackupPattern) -> BackupResult<BackupSet> {
        let names = self.fs.list_files(&self.job.destination)?;
        Ok(BackupSet::from_names(pattern, names))
    }
}
