//! Retention: keep the newest N backups
//!
//! The backup set is an ordered list of entries; because backup names embed a
//! sortable timestamp, name order is creation order. Deciding what to delete is
//! a pure function of that list and the retention count.

use crate::error::{BackupError, BackupResult};

use super::naming::BackupPattern;

/// Default number of backups to keep
pub const DEFAULT_KEEP: u32 = 30;

/// One backup file in the destination directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BackupEntry {
    /// File name, which is also the sort key
    pub name: String,
}

/// All backups of one source, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupSet {
    entries: Vec<BackupEntry>,
}

impl BackupSet {
    /// Collect the names matching `pattern` and sort them ascending
    pub fn from_names<I>(pattern: &BackupPattern, names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries: Vec<BackupEntry> = names
            .into_iter()
            .filter(|name| pattern.matches(name))
            .map(|name| BackupEntry { name })
            .collect();
        entries.sort();
        entries.dedup();
        Self { entries }
    }

    /// Add an entry, keeping the set ordered. A name already present is not duplicated.
    pub fn insert(&mut self, name: String) {
        let entry = BackupEntry { name };
        if let Err(pos) = self.entries.binary_search(&entry) {
            self.entries.insert(pos, entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BackupEntry] {
        &self.entries
    }
}

/// How many backups survive pruning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    keep: usize,
}

impl RetentionPolicy {
    /// Create a policy keeping the `keep` newest backups
    ///
    /// # Errors
    ///
    /// Zero is rejected: it would delete the backup that was just taken.
    pub fn new(keep: u32) -> BackupResult<Self> {
        if keep == 0 {
            return Err(BackupError::Validation(
                "Retention count must be at least 1".into(),
            ));
        }
        Ok(Self {
            keep: keep as usize,
        })
    }

    pub fn keep(&self) -> usize {
        self.keep
    }

    /// Entries to delete: the oldest ones beyond the retention count
    pub fn expired<'a>(&self, set: &'a BackupSet) -> &'a [BackupEntry] {
        let excess = set.len().saturating_sub(self.keep);
        &set.entries()[..excess]
    }

    /// Number of entries left after pruning `set`
    pub fn retained_count(&self, set: &BackupSet) -> usize {
        set.len().min(self.keep)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep: DEFAULT_KEEP as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn pattern() -> BackupPattern {
        BackupPattern::for_source(Path::new("acchelper.db")).unwrap()
    }

    fn set_of(names: &[&str]) -> BackupSet {
        BackupSet::from_names(&pattern(), names.iter().map(|n| n.to_string()))
    }

    fn names(entries: &[BackupEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_set_filters_and_sorts() {
        let set = set_of(&[
            "acchelper_20240103_000000.db",
            "readme.txt",
            "acchelper_20240101_000000.db",
            "acchelper.db",
            "acchelper_20240102_000000.db",
        ]);

        assert_eq!(
            names(set.entries()),
            vec![
                "acchelper_20240101_000000.db",
                "acchelper_20240102_000000.db",
                "acchelper_20240103_000000.db",
            ]
        );
    }

    #[test]
    fn test_insert_keeps_order_and_skips_duplicates() {
        let mut set = set_of(&["acchelper_20240101_000000.db", "acchelper_20240103_000000.db"]);
        set.insert("acchelper_20240102_000000.db".into());
        set.insert("acchelper_20240103_000000.db".into());

        assert_eq!(set.len(), 3);
        assert_eq!(set.entries()[1].name, "acchelper_20240102_000000.db");
    }

    #[test]
    fn test_zero_keep_rejected() {
        assert!(RetentionPolicy::new(0).unwrap_err().is_validation());
        assert_eq!(RetentionPolicy::new(1).unwrap().keep(), 1);
        assert_eq!(RetentionPolicy::default().keep(), 30);
    }

    #[test]
    fn test_expired_oldest_first() {
        let set = set_of(&[
            "acchelper_20240101_000000.db",
            "acchelper_20240102_000000.db",
            "acchelper_20240103_000000.db",
            "acchelper_20240104_000000.db",
        ]);
        let policy = RetentionPolicy::new(2).unwrap();

        assert_eq!(
            names(policy.expired(&set)),
            vec!["acchelper_20240101_000000.db", "acchelper_20240102_000000.db"]
        );
        assert_eq!(policy.retained_count(&set), 2);
    }

    #[test]
    fn test_nothing_expires_within_limit() {
        let set = set_of(&["acchelper_20240101_000000.db", "acchelper_20240102_000000.db"]);

        assert!(RetentionPolicy::new(2).unwrap().expired(&set).is_empty());
        assert!(RetentionPolicy::new(30).unwrap().expired(&set).is_empty());
        assert!(RetentionPolicy::new(3).unwrap().expired(&BackupSet::default()).is_empty());
    }

    #[test]
    fn test_retained_count_is_bounded() {
        let policy = RetentionPolicy::new(3).unwrap();
        for n in 0..8 {
            let names: Vec<String> = (0..n)
                .map(|i| format!("acchelper_202401{:02}_000000.db", i + 1))
                .collect();
            let set = BackupSet::from_names(&pattern(), names);
            assert_eq!(policy.retained_count(&set), n.min(3));
            assert_eq!(policy.expired(&set).len(), n.saturating_sub(3));
        }
    }
}
