//! Backup CLI command
//!
//! Resolves the job from flags and settings, runs it once and prints one line
//! per action.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;

use crate::backup::{BackupEvent, BackupManager, BackupPlan};
use crate::config::paths::BackupPaths;
use crate::config::settings::{Overrides, Settings};
use crate::error::BackupResult;

/// Flags selecting what to back up and how many backups to keep
#[derive(Args, Debug, Clone, Default)]
pub struct BackupArgs {
    /// Path to database file [default: <base>/data/acchelper.db]
    #[arg(long, value_name = "PATH", env = "ACCHELPER_BACKUP_DB")]
    pub db: Option<PathBuf>,

    /// Backup destination directory [default: <base>/data/backups]
    #[arg(long, value_name = "PATH", env = "ACCHELPER_BACKUP_DEST")]
    pub dest: Option<PathBuf>,

    /// Number of backups to keep [default: 30]
    #[arg(long, value_name = "N", env = "ACCHELPER_BACKUP_KEEP")]
    pub keep: Option<u32>,

    /// Show what would be created and removed without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl BackupArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            source: self.db.clone(),
            destination: self.dest.clone(),
            keep: self.keep,
        }
    }
}

/// Handle a backup invocation
pub fn handle_backup_command(
    paths: &BackupPaths,
    settings: &Settings,
    args: BackupArgs,
) -> BackupResult<()> {
    let job = settings.resolve_job(paths, args.overrides())?;
    tracing::debug!(
        source = %job.source.display(),
        destination = %job.destination.display(),
        keep = job.retention.keep(),
        "Resolved backup job"
    );

    let manager = BackupManager::new(job);

    if args.dry_run {
        let plan = manager.plan_at(Local::now().naive_local())?;
        for line in describe_plan(&plan, &manager.job().source) {
            println!("{}", line);
        }
        return Ok(());
    }

    manager.run_at(Local::now().naive_local(), |event| {
        println!("{}", describe_event(event));
    })?;

    Ok(())
}

/// Console line for a backup event
pub fn describe_event(event: &BackupEvent) -> String {
    match event {
        BackupEvent::SourceMissing { source } => {
            format!("Database not found: {}", source.display())
        }
        BackupEvent::Created { path, .. } => format!("Backup created: {}", path.display()),
        BackupEvent::Removed { name } => format!("Removed old backup: {}", name),
        BackupEvent::Total { count } => format!("Total backups: {}", count),
    }
}

/// Console lines for a dry run
pub fn describe_plan(plan: &BackupPlan, source: &Path) -> Vec<String> {
    let Some(backup_path) = &plan.backup_path else {
        return vec![format!("Database not found: {}", source.display())];
    };

    let mut lines = Vec::with_capacity(plan.removals.len() + 2);
    if plan.overwrites {
        lines.push(format!(
            "Would overwrite backup: {} (same second)",
            backup_path.display()
        ));
    } else {
        lines.push(format!("Would create backup: {}", backup_path.display()));
    }
    for name in &plan.removals {
        lines.push(format!("Would remove old backup: {}", name));
    }
    lines.push(format!("Total backups after run: {}", plan.total));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_describe_events() {
        assert_eq!(
            describe_event(&BackupEvent::SourceMissing {
                source: PathBuf::from("/data/acchelper.db")
            }),
            "Database not found: /data/acchelper.db"
        );
        assert_eq!(
            describe_event(&BackupEvent::Created {
                path: PathBuf::from("/data/backups/acchelper_20240101_000000.db"),
                bytes: 10,
            }),
            "Backup created: /data/backups/acchelper_20240101_000000.db"
        );
        assert_eq!(
            describe_event(&BackupEvent::Removed {
                name: "acchelper_20240101_000000.db".into()
            }),
            "Removed old backup: acchelper_20240101_000000.db"
        );
        assert_eq!(
            describe_event(&BackupEvent::Total { count: 3 }),
            "Total backups: 3"
        );
    }

    #[test]
    fn test_describe_plan() {
        let plan = BackupPlan {
            backup_path: Some(PathBuf::from("/b/acchelper_20240104_000000.db")),
            overwrites: false,
            removals: vec!["acchelper_20240101_000000.db".into()],
            total: 2,
        };

        assert_eq!(
            describe_plan(&plan, Path::new("/a/acchelper.db")),
            vec![
                "Would create backup: /b/acchelper_20240104_000000.db",
                "Would remove old backup: acchelper_20240101_000000.db",
                "Total backups after run: 2",
            ]
        );

        let missing = describe_plan(&BackupPlan::default(), Path::new("/a/acchelper.db"));
        assert_eq!(missing, vec!["Database not found: /a/acchelper.db"]);
    }

    #[test]
    fn test_handle_backup_uses_base_dir_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = BackupPaths::with_base_dir(temp.path().to_path_buf());
        fs::create_dir_all(paths.data_dir()).unwrap();
        fs::write(paths.database_file(), b"db").unwrap();

        handle_backup_command(&paths, &Settings::default(), BackupArgs::default()).unwrap();

        let backups: Vec<_> = fs::read_dir(paths.backup_dir()).unwrap().collect();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let paths = BackupPaths::with_base_dir(temp.path().to_path_buf());
        fs::create_dir_all(paths.data_dir()).unwrap();
        fs::write(paths.database_file(), b"db").unwrap();

        let args = BackupArgs {
            dry_run: true,
            ..BackupArgs::default()
        };
        handle_backup_command(&paths, &Settings::default(), args).unwrap();

        assert!(!paths.backup_dir().exists());
    }
}
