//! Configuration module
//!
//! This module provides:
//! - Base-directory and default path resolution
//! - The optional settings file and how it combines with command-line values

pub mod paths;
pub mod settings;

pub use paths::BackupPaths;
pub use settings::{Overrides, Settings};
