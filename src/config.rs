//! Configuration types for sri-static

use crate::algorithm::Algorithm;
use crate::cache::{CacheStores, FileStore, DEFAULT_KEY_MEMO_CAPACITY, SRI_CACHE_ALIAS};
use crate::error::{Result, SriError};
use crate::static_files::DEFAULT_STATIC_URL;
use std::path::PathBuf;
use std::sync::Arc;

/// Output format for integrity results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per asset
    #[default]
    Console,
    /// JSON document with per-asset results
    Json,
}

/// Configuration options for sri-static
#[derive(Debug, Clone)]
pub struct Config {
    /// Algorithm used when a caller does not name one (default: sha256)
    pub algorithm: Algorithm,

    /// Emit integrity attributes on tags
    pub use_sri: bool,

    /// Static root directories, searched in order
    pub static_dirs: Vec<PathBuf>,

    /// Public URL prefix for static assets
    pub static_url: String,

    // === Digest cache ===
    /// Directory for the persistent "sri" store. None keeps digests in memory only.
    pub cache_dir: Option<PathBuf>,

    /// Clear the digest cache before hashing
    pub clear_cache: bool,

    /// Maximum number of memoized cache keys
    pub key_memo_capacity: usize,

    // === Output ===
    /// Emit full HTML tags instead of bare integrity values
    pub emit_tags: bool,

    /// Output format (console or json)
    pub output_format: OutputFormat,

    /// Path to output file (or "-" for stdout)
    pub output_filename: String,

    /// Number of threads for parallel hashing (default: num_cpus)
    pub num_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            use_sri: true,
            static_dirs: Vec::new(),
            static_url: String::from(DEFAULT_STATIC_URL),
            // Caching
            cache_dir: None,
            clear_cache: false,
            key_memo_capacity: DEFAULT_KEY_MEMO_CAPACITY,
            // Output
            emit_tags: false,
            output_format: OutputFormat::Console,
            output_filename: String::from("-"),
            num_threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Check option combinations that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.static_dirs.is_empty() {
            return Err(SriError::InvalidConfig(
                "at least one static directory is required".to_string(),
            ));
        }
        if self.key_memo_capacity == 0 {
            return Err(SriError::InvalidConfig(
                "cache key memo capacity must be non-zero".to_string(),
            ));
        }
        if self.num_threads == 0 {
            return Err(SriError::InvalidConfig(
                "thread count must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the store registry: an in-memory default, plus the "sri"
    /// file store when a cache directory is configured
    pub fn cache_stores(&self) -> Result<CacheStores> {
        let stores = CacheStores::in_memory();
        match &self.cache_dir {
            Some(dir) => {
                let store = FileStore::new(dir)?;
                Ok(stores.with_store(SRI_CACHE_ALIAS, Arc::new(store)))
            }
            None => Ok(stores),
        }
    }
}
