//! AccHelper database backup
//!
//! Takes a timestamped copy of the AccHelper SQLite database and prunes old
//! copies so that only the most recent ones are kept.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Base directory, default paths and the optional settings file
//! - `error`: Custom error types
//! - `backup`: Backup naming, retention and the backup manager
//! - `cli`: Command-line flags and console reporting
//!
//! # Example
//!
//! ```rust,ignore
//! use acchelper_backup::config::{BackupPaths, Overrides, Settings};
//! use acchelper_backup::backup::BackupManager;
//!
//! let paths = BackupPaths::new()?;
//! let settings = Settings::load_or_default(&paths)?;
//! let job = settings.resolve_job(&paths, Overrides::default())?;
//! BackupManager::new(job).run()?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;

pub use error::BackupError;
