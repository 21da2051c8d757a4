//! Cache store implementations and the named store registry

use crate::error::{Result, SriError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Alias of the store that is always configured
pub const DEFAULT_CACHE_ALIAS: &str = "default";

/// Alias of the dedicated SRI store, preferred when configured
pub const SRI_CACHE_ALIAS: &str = "sri";

/// Current on-disk entry format version
const CACHE_VERSION: u32 = 1;

/// Key-value store holding computed digests
pub trait CacheStore: Send + Sync {
    /// Look up a value
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove every entry
    fn clear(&self) -> Result<()>;
}

/// Process-local store
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }
}

/// On-disk entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Entry format version
    version: u32,
    /// Full store key, checked on read
    key: String,
    /// Cached digest
    value: String,
}

/// Directory-backed store, one JSON file per key
///
/// Survives process restarts; share a directory between processes on one
/// host to share digests.
pub struct FileStore {
    /// Directory where entry files are stored
    cache_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `cache_dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns `CacheError` if the directory cannot be created
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).map_err(|e| {
                SriError::CacheError(format!(
                    "Failed to create cache directory '{}': {}",
                    cache_dir.display(),
                    e
                ))
            })?;
        }

        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Entry file for a key
    fn entry_path(&self, key: &str) -> PathBuf {
        // Hash-based filename keeps arbitrary keys filesystem-safe
        let key_hash = hex::encode(Sha256::digest(key.as_bytes()));
        self.cache_dir.join(format!("{}.cache", &key_hash[..32]))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entry_path = self.entry_path(key);
        if !entry_path.exists() {
            return None;
        }

        let file = File::open(&entry_path).ok()?;
        let reader = BufReader::new(file);
        let entry: CacheEntry = serde_json::from_reader(reader).ok()?;

        if entry.version != CACHE_VERSION || entry.key != key {
            return None;
        }

        Some(entry.value)
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let entry_path = self.entry_path(key);
        let entry = CacheEntry {
            version: CACHE_VERSION,
            key: key.to_string(),
            value,
        };

        let file = File::create(&entry_path).map_err(|e| {
            SriError::CacheError(format!(
                "Failed to create cache file '{}': {}",
                entry_path.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &entry)
            .map_err(|e| SriError::CacheError(format!("Failed to write cache entry: {}", e)))?;
        writer
            .flush()
            .map_err(|e| SriError::CacheError(format!("Failed to write cache entry: {}", e)))?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            return Ok(());
        }

        // Remove only .cache files, leave anything else in the directory alone
        for entry in fs::read_dir(&self.cache_dir).map_err(|e| {
            SriError::CacheError(format!(
                "Failed to read cache directory '{}': {}",
                self.cache_dir.display(),
                e
            ))
        })? {
            let entry = entry
                .map_err(|e| SriError::CacheError(format!("Failed to read cache entry: {}", e)))?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "cache") {
                fs::remove_file(&path).map_err(|e| {
                    SriError::CacheError(format!(
                        "Failed to remove cache file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

/// Named store registry
///
/// Always carries a default store, so selection with the default alias as
/// the last candidate cannot fail.
#[derive(Clone)]
pub struct CacheStores {
    stores: HashMap<String, Arc<dyn CacheStore>>,
}

impl CacheStores {
    /// Registry with `default` as the default store
    pub fn new(default: Arc<dyn CacheStore>) -> Self {
        let mut stores = HashMap::new();
        stores.insert(DEFAULT_CACHE_ALIAS.to_string(), default);
        Self { stores }
    }

    /// Registry with an in-memory default store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Register (or replace) a named store
    pub fn with_store(mut self, alias: &str, store: Arc<dyn CacheStore>) -> Self {
        self.stores.insert(alias.to_string(), store);
        self
    }

    /// Look up a named store
    ///
    /// # Errors
    /// Returns `CacheStoreUnavailable` if nothing is registered under `alias`
    pub fn get(&self, alias: &str) -> Result<Arc<dyn CacheStore>> {
        self.stores
            .get(alias)
            .cloned()
            .ok_or_else(|| SriError::CacheStoreUnavailable(alias.to_string()))
    }

    /// First configured store among `candidates`, falling back to the default
    pub fn select(&self, candidates: &[&str]) -> (String, Arc<dyn CacheStore>) {
        for alias in candidates {
            match self.get(alias) {
                Ok(store) => return (alias.to_string(), store),
                Err(_) => {
                    tracing::debug!(alias = *alias, "cache store not configured, trying next");
                }
            }
        }

        let default = Arc::clone(&self.stores[DEFAULT_CACHE_ALIAS]);
        (DEFAULT_CACHE_ALIAS.to_string(), default)
    }
}
