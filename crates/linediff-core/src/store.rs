//! Preference storage behind an injected key-value interface
//!
//! The engine itself is stateless. Front ends that want to remember the
//! comparison toggles between sessions go through [`Preferences`], which only
//! needs something implementing [`KeyValueStore`].

use crate::diff::{Algorithm, DiffEngine, DiffOptions};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const IGNORE_CASE_KEY: &str = "linediff.ignore_case";
pub const IGNORE_WHITESPACE_KEY: &str = "linediff.ignore_whitespace";
pub const ALGORITHM_KEY: &str = "linediff.algorithm";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store backend error: {0}")]
    Backend(String),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything needed to reproduce a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffSettings {
    pub options: DiffOptions,
    pub algorithm: Algorithm,
}

impl DiffSettings {
    pub fn engine(&self) -> DiffEngine {
        DiffEngine::new()
            .with_options(self.options)
            .with_algorithm(self.algorithm)
    }
}

/// Typed access to stored diff settings
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn ignore_case(&self) -> Result<Option<bool>, StoreError> {
        self.read_bool(IGNORE_CASE_KEY)
    }

    pub fn ignore_whitespace(&self) -> Result<Option<bool>, StoreError> {
        self.read_bool(IGNORE_WHITESPACE_KEY)
    }

    pub fn algorithm(&self) -> Result<Option<Algorithm>, StoreError> {
        match self.store.get(ALGORITHM_KEY)? {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| invalid(ALGORITHM_KEY, &value)),
            None => Ok(None),
        }
    }

    /// Overlay stored values on `base`. Keys that were never stored keep the base value.
    pub fn apply(&self, base: DiffSettings) -> Result<DiffSettings, StoreError> {
        let mut settings = base;
        if let Some(v) = self.ignore_case()? {
            settings.options.ignore_case = v;
        }
        if let Some(v) = self.ignore_whitespace()? {
            settings.options.ignore_whitespace = v;
        }
        if let Some(v) = self.algorithm()? {
            settings.algorithm = v;
        }
        Ok(settings)
    }

    pub fn save(&mut self, settings: DiffSettings) -> Result<(), StoreError> {
        self.store
            .set(IGNORE_CASE_KEY, bool_str(settings.options.ignore_case))?;
        self.store.set(
            IGNORE_WHITESPACE_KEY,
            bool_str(settings.options.ignore_whitespace),
        )?;
        self.store.set(ALGORITHM_KEY, settings.algorithm.as_str())?;
        debug!(?settings, "saved diff preferences");
        Ok(())
    }

    fn read_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        match self.store.get(key)?.as_deref() {
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(invalid(key, other)),
            None => Ok(None),
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn invalid(key: &str, value: &str) -> StoreError {
    StoreError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_keys_keep_base() {
        let prefs = Preferences::new(MemoryStore::new());
        let base = DiffSettings {
            options: DiffOptions {
                ignore_case: true,
                ignore_whitespace: false,
            },
            algorithm: Algorithm::Lcs,
        };
        assert_eq!(prefs.apply(base).unwrap(), base);
    }

    #[test]
    fn test_save_then_apply() {
        let mut store = MemoryStore::new();
        let saved = DiffSettings {
            options: DiffOptions {
                ignore_case: false,
                ignore_whitespace: true,
            },
            algorithm: Algorithm::Lcs,
        };
        Preferences::new(&mut store).save(saved).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.get(ALGORITHM_KEY).unwrap().as_deref(),
            Some("lcs")
        );

        let prefs = Preferences::new(store);
        assert_eq!(prefs.apply(DiffSettings::default()).unwrap(), saved);
    }

    #[test]
    fn test_partial_overlay() {
        let mut store = MemoryStore::new();
        store.set(IGNORE_WHITESPACE_KEY, "true").unwrap();
        let prefs = Preferences::new(store);

        let settings = prefs.apply(DiffSettings::default()).unwrap();
        assert!(settings.options.ignore_whitespace);
        assert!(!settings.options.ignore_case);
        assert_eq!(settings.algorithm, Algorithm::Greedy);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let mut store = MemoryStore::new();
        store.set(IGNORE_CASE_KEY, "yes").unwrap();
        store.set(ALGORITHM_KEY, "patience").unwrap();
        let prefs = Preferences::new(store);

        assert!(matches!(
            prefs.ignore_case(),
            Err(StoreError::InvalidValue { ref value, .. }) if value == "yes"
        ));
        assert!(prefs.algorithm().is_err());
        assert!(prefs.apply(DiffSettings::default()).is_err());
    }

    #[test]
    fn test_settings_engine() {
        let settings = DiffSettings {
            options: DiffOptions {
                ignore_case: true,
                ignore_whitespace: false,
            },
            algorithm: Algorithm::Lcs,
        };
        let engine = settings.engine();
        assert_eq!(engine.options(), settings.options);
        assert_eq!(engine.algorithm(), Algorithm::Lcs);
    }
}
