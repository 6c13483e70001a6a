//! Backup system
//!
//! Takes timestamped copies of a database file and keeps a rolling window of
//! the most recent ones.
//!
//! # Architecture
//!
//! - `naming`: builds and recognises backup file names
//! - `retention`: the ordered backup set and the keep-newest-N rule
//! - `fs`: the filesystem operations a run needs, behind the `BackupFs` trait
//! - `manager`: `BackupManager`, which runs a backup job end to end
//!
//! # Backup Names
//!
//! A backup of `acchelper.db` taken on 2024-01-03 at 09:05:07 local time is
//! named `acchelper_20240103_090507.db`. Sorting names sorts backups by age.
//! Two runs within the same second produce the same name and the second copy
//! replaces the first.
//!
//! # Example
//!
//! ```rust,ignore
//! use acchelper_backup::backup::{BackupJob, BackupManager, RetentionPolicy};
//!
//! let job = BackupJob {
//!     source: "data/acchelper.db".into(),
//!     destination: "data/backups".into(),
//!     retention: RetentionPolicy::new(30)?,
//! };
//! let report = BackupManager::new(job).run()?;
//! println!("Total backups: {}", report.total);
//! ```

mod fs;
mod manager;
mod naming;
mod retention;

pub use fs::{BackupFs, LocalFs};
pub use manager::{BackupEvent, BackupJob, BackupManager, BackupPlan, BackupReport};
pub use naming::{BackupPattern, TIMESTAMP_FORMAT};
pub use retention::{BackupEntry, BackupSet, RetentionPolicy, DEFAULT_KEEP};
