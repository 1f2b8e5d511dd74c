//! TOML file backed preference store

use linediff_core::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat string table persisted on every write
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default store location
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("linediff").join("prefs.toml"))
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries: BTreeMap<String, String> = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| {
                StoreError::Backend(format!("{}: {}", path.display(), e.message()))
            })?
        } else {
            BTreeMap::new()
        };
        debug!(entries = entries.len(), "opened preference store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string(&self.entries).map_err(|e| StoreError::Backend(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linediff_core::{Algorithm, DiffOptions, DiffSettings, Preferences};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("prefs.toml")).unwrap();
        assert_eq!(store.get("linediff.ignore_case").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.set("linediff.algorithm", "lcs").unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("linediff.algorithm").unwrap().as_deref(),
            Some("lcs")
        );
    }

    #[test]
    fn test_preferences_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let settings = DiffSettings {
            options: DiffOptions {
                ignore_case: true,
                ignore_whitespace: true,
            },
            algorithm: Algorithm::Lcs,
        };

        Preferences::new(FileStore::open(&path).unwrap())
            .save(settings)
            .unwrap();

        let prefs = Preferences::new(FileStore::open(&path).unwrap());
        assert_eq!(prefs.apply(DiffSettings::default()).unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
