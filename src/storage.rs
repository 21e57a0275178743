//! Durable key-value storage for user preferences
//!
//! Preferences live in a small TOML table (`.themeswitch/preferences.toml` by
//! default). Only string values are stored.

use crate::error::PersistenceError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// Default preferences file, relative to the working directory
pub const DEFAULT_PREFERENCES_FILE: &str = ".themeswitch/preferences.toml";

/// Key-value slot storage (allows mocking)
#[cfg_attr(test, automock)]
pub trait PreferenceStorage {
    /// Read the value stored under `key`, `None` if the slot is empty
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// TOML file backed preference storage
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default location
    pub fn default_location() -> Self {
        Self::new(DEFAULT_PREFERENCES_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_table(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| PersistenceError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStorage for FilePreferences {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.load_table()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        // A corrupt file is replaced rather than blocking new writes
        let mut table = match self.load_table() {
            Ok(table) => table,
            Err(PersistenceError::Corrupt { .. }) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        table.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content = toml::to_string_pretty(&table)?;
        fs::write(&self.path, content).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let prefs = FilePreferences::new(dir.path().join("prefs.toml"));
        assert_eq!(prefs.read("app-theme").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/prefs.toml");
        let mut prefs = FilePreferences::new(&path);

        prefs.write("app-theme", "theme2").unwrap();
        assert!(path.exists());
        assert_eq!(prefs.read("app-theme").unwrap().as_deref(), Some("theme2"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("app-theme = \"theme2\""));
    }

    #[test]
    fn test_write_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "other = \"kept\"\n").unwrap();

        let mut prefs = FilePreferences::new(&path);
        prefs.write("app-theme", "theme3").unwrap();

        assert_eq!(prefs.read("other").unwrap().as_deref(), Some("kept"));
        assert_eq!(prefs.read("app-theme").unwrap().as_deref(), Some("theme3"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let mut prefs = FilePreferences::new(&path);
        let err = prefs.read("app-theme").unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));

        // Writing recovers the file
        prefs.write("app-theme", "theme1").unwrap();
        assert_eq!(prefs.read("app-theme").unwrap().as_deref(), Some("theme1"));
    }

    #[test]
    fn test_unreadable_file_is_not_replaced() {
        let dir = TempDir::new().unwrap();
        // A directory at the file path cannot be read as a string
        let path = dir.path().join("prefs.toml");
        fs::create_dir(&path).unwrap();

        let mut prefs = FilePreferences::new(&path);
        let err = prefs.write("app-theme", "theme2").unwrap_err();
        assert!(matches!(err, PersistenceError::Read { .. }));
        assert!(path.is_dir());
    }
}
