//! Persistence for the best time.
//!
//! The engine only needs "get/set one integer under a fixed key". Hosts
//! back that with whatever survives a session: browser local storage, a
//! file, a database. Two implementations ship here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::Result;

/// Key-value storage for best times.
pub trait ScoreStore: Send {
    /// Read the stored time for `key`, if any.
    fn load_best(&self, key: &str) -> Result<Option<u32>>;

    /// Write the time for `key`.
    fn save_best(&mut self, key: &str, seconds: u32) -> Result<()>;

    /// Forget the time for `key`.
    fn clear(&mut self, key: &str) -> Result<()>;
}

/// Store that lives as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    values: FxHashMap<String, u32>,
}

impl MemoryScoreStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, seconds: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.into(), seconds);
        store
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.values.get(key).copied())
    }

    fn save_best(&mut self, key: &str, seconds: u32) -> Result<()> {
        self.values.insert(key.to_string(), seconds);
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk, `{"key": seconds, ...}`.
///
/// The file is read on every load and rewritten on every save, so two
/// engines sharing a file see each other's records.
#[derive(Clone, Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    /// Store at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write_all(&self, values: &BTreeMap<String, u32>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load_best(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn save_best(&mut self, key: &str, seconds: u32) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), seconds);
        self.write_all(&values)
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}
