//! Client-local key-value storage.
//!
//! Values are JSON documents stored under string keys in a single file next
//! to the configuration. Writes use a temp file + rename.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// File name of the store inside the config directory.
pub const LOCAL_STORE_FILE: &str = "local_storage.json";

/// JSON key-value store persisted to one file.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl LocalStore {
    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .context(format!("Failed to read local store: {}", path.display()))?;
        let values = serde_json::from_str(&content)
            .context(format!("Failed to parse local store: {}", path.display()))?;

        Ok(Self { path, values })
    }

    /// Opens the store in the application config directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Config::config_dir()?.join(LOCAL_STORE_FILE))
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and deserializes the value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.values
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .context(format!("Stored value for '{key}' has an unexpected shape"))
            })
            .transpose()
    }

    /// Serializes `value` under `key` (in memory; call `save` to persist).
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .context(format!("Failed to serialize value for '{key}'"))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Removes a key. Returns true if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Writes the store to disk atomically.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create local store directory: {}",
                parent.display()
            ))?;
        }

        let content =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize local store")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp local store: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp local store to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}
