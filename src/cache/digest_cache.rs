//! Store-backed memoization of digest engine results

use crate::algorithm::Algorithm;
use crate::cache::key::{CacheKey, CacheKeyMemo};
use crate::cache::storage::{CacheStore, CacheStores, DEFAULT_CACHE_ALIAS, SRI_CACHE_ALIAS};
use crate::digest::compute_digest;
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Store candidates, most preferred first
const STORE_CANDIDATES: [&str; 2] = [SRI_CACHE_ALIAS, DEFAULT_CACHE_ALIAS];

/// Digest cache
///
/// Safe to share between threads. Concurrent cold lookups of the same key
/// may each compute the digest; results are identical and the last write
/// wins.
pub struct DigestCache {
    store: Arc<dyn CacheStore>,
    store_alias: String,
    keys: CacheKeyMemo,
}

impl DigestCache {
    /// Build a cache over the preferred store in `stores`
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `key_memo_capacity` is 0
    pub fn new(stores: &CacheStores, key_memo_capacity: usize) -> Result<Self> {
        let (store_alias, store) = stores.select(&STORE_CANDIDATES);
        tracing::debug!(store = %store_alias, "selected digest cache store");

        Ok(Self {
            store,
            store_alias,
            keys: CacheKeyMemo::new(key_memo_capacity)?,
        })
    }

    /// Alias of the store backing this cache
    pub fn store_alias(&self) -> &str {
        &self.store_alias
    }

    /// Store key for `(path, algorithm)`
    pub fn cache_key(&self, path: &Path, algorithm: Algorithm) -> CacheKey {
        self.keys.get(path, algorithm)
    }

    /// Return the cached digest, computing and storing it on a miss
    ///
    /// A hit is returned as stored; the file is not re-read.
    ///
    /// # Errors
    /// `FileAccess` if the digest must be computed and the file is unreadable
    pub fn get_or_compute(&self, path: &Path, algorithm: Algorithm) -> Result<String> {
        let key = self.cache_key(path, algorithm);

        if let Some(digest) = self.store.get(key.as_str()) {
            tracing::debug!(path = %path.display(), %key, "digest cache hit");
            return Ok(digest);
        }

        tracing::debug!(path = %path.display(), %key, "digest cache miss");
        let digest = compute_digest(path, algorithm)?;

        if let Err(e) = self.store.set(key.as_str(), digest.clone()) {
            tracing::warn!(%key, error = %e, "failed to store digest");
        }

        Ok(digest)
    }

    /// Clear the backing store
    pub fn clear(&self) -> Result<()> {
        tracing::debug!(store = %self.store_alias, "clearing digest cache");
        self.store.clear()
    }
}
