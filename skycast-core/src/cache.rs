//! Key-value cache store for raw API responses.
//!
//! The repository treats the store as a dumb byte/number map; it never sees
//! store errors. Writes replace a whole record at a time, so concurrent
//! writers degrade to last-writer-wins rather than corruption.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Cache key for the raw current-weather response body.
pub const CACHE_KEY_CURRENT_WEATHER: &str = "cachedCurrentWeather";
/// Cache key for the raw forecast response body.
pub const CACHE_KEY_FORECAST: &str = "cachedForecast";
/// Cache key for the forecast write timestamp (epoch seconds).
pub const CACHE_KEY_FORECAST_WRITTEN: &str = "cacheExpiryForecast";

/// Maximum age of a cached forecast before it is treated as stale.
pub const FORECAST_MAX_AGE_SECS: f64 = 3600.0;

/// Persistent key-value store consumed by the client and repository.
///
/// Implementations are infallible from the caller's point of view: a failed
/// read is an absent record, a failed write is dropped. The cache layer never
/// surfaces errors.
pub trait CacheStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&self, key: &str, value: &[u8]);
    fn get_number(&self, key: &str) -> Option<f64>;
    fn set_number(&self, key: &str, value: f64);
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreContents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().ok()?.blobs.get(key).cloned()
    }

    fn set(&self, key: &str, value: &[u8]) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.blobs.insert(key.to_string(), value.to_vec());
        }
    }

    fn get_number(&self, key: &str) -> Option<f64> {
        self.inner.lock().ok()?.numbers.get(key).copied()
    }

    fn set_number(&self, key: &str, value: f64) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.numbers.insert(key.to_string(), value);
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreContents {
    blobs: HashMap<String, Vec<u8>>,
    numbers: HashMap<String, f64>,
}

/// File-backed store: a single JSON file rewritten whole on every set.
///
/// Reads go back to disk each time, so multiple processes see each other's
/// writes with last-writer-wins semantics.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store at the platform cache directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform cache directory"))?;

        Ok(Self::new(dirs.cache_dir().join("weather_cache.json")))
    }

    fn load(&self) -> StoreContents {
        match self.try_load() {
            Ok(contents) => contents,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "cache file unreadable, treating as empty");
                StoreContents::default()
            }
        }
    }

    fn try_load(&self) -> Result<StoreContents> {
        if !self.path.exists() {
            return Ok(StoreContents::default());
        }
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse cache file: {}", self.path.display()))
    }

    fn save(&self, contents: &StoreContents) {
        if let Err(err) = self.try_save(contents) {
            tracing::warn!(path = %self.path.display(), %err, "cache write dropped");
        }
    }

    fn try_save(&self, contents: &StoreContents) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }
        let bytes = serde_json::to_vec(contents).context("Failed to serialize cache contents")?;

        // Write-then-rename so a concurrent reader sees either the old file
        // or the new one, never a torn write.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("Failed to write cache file: {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace cache file: {}", self.path.display()))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.load().blobs.get(key).cloned()
    }

    fn set(&self, key: &str, value: &[u8]) {
        let mut contents = self.load();
        contents.blobs.insert(key.to_string(), value.to_vec());
        self.save(&contents);
    }

    fn get_number(&self, key: &str) -> Option<f64> {
        self.load().numbers.get(key).copied()
    }

    fn set_number(&self, key: &str, value: f64) {
        let mut contents = self.load();
        contents.numbers.insert(key.to_string(), value);
        self.save(&contents);
    }
}
