//! Persisted user preferences.
//!
//! A single key-value surface backing the one preference this system keeps
//! (the color scheme). The JSON file implementation survives reloads; the
//! in-memory implementation backs tests.

use anyhow::{Context as _, Error};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Client-local persistent key-value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Volatile store for tests and headless runs.
#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store persisted as a small JSON object on disk. Every write
/// rewrites the file; the value set is one key deep and tiny.
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, reading existing values if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("malformed preference file {}", path.display()))?,
            Err(_) => HashMap::new(),
        };
        Ok(Self { path, values })
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&self.values)
            .context("serializing preferences")?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing preference file {}", self.path.display()))
    }
}
