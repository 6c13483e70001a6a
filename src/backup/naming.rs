//! Backup file naming
//!
//! Backups are named `{stem}_{YYYYMMDD_HHMMSS}{extension}` after the source
//! file, so sorting names also sorts backups by creation time.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{BackupError, BackupResult};

/// strftime format of the timestamp embedded in backup names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Stem and extension of a source file, used to build and recognise its backups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPattern {
    /// File name without the extension
    stem: String,
    /// Extension including the leading dot, or empty
    extension: String,
}

impl BackupPattern {
    /// Build the pattern for a source file path
    ///
    /// The extension is taken from the last dot, unless that dot starts or
    /// ends the name (`.bashrc`, `archive.`), in which case there is none.
    pub fn for_source(source: &Path) -> BackupResult<Self> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                BackupError::Validation(format!(
                    "Source path has no usable file name: {}",
                    source.display()
                ))
            })?;

        Ok(Self::from_file_name(name))
    }

    fn from_file_name(name: &str) -> Self {
        match name.rfind('.') {
            Some(idx) if idx > 0 && idx < name.len() - 1 => Self {
                stem: name[..idx].to_string(),
                extension: name[idx..].to_string(),
            },
            _ => Self {
                stem: name.to_string(),
                extension: String::new(),
            },
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name of the backup taken at `timestamp`
    pub fn file_name_at(&self, timestamp: NaiveDateTime) -> String {
        format!(
            "{}_{}{}",
            self.stem,
            timestamp.format(TIMESTAMP_FORMAT),
            self.extension
        )
    }

    /// Whether `name` belongs to this source's backup set (`{stem}_*{extension}`)
    pub fn matches(&self, name: &str) -> bool {
        self.middle(name).is_some()
    }

    /// The part matched by `*` in `{stem}_*{extension}`
    fn middle<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_prefix(self.stem.as_str())?
            .strip_prefix('_')?
            .strip_suffix(self.extension.as_str())
    }
}
