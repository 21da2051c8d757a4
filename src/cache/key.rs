//! Cache key derivation

use crate::algorithm::Algorithm;
use crate::error::{Result, SriError};
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default number of memoized keys
pub const DEFAULT_KEY_MEMO_CAPACITY: usize = 1024;

/// Hex characters of the path fingerprint kept in a key
const PATH_FINGERPRINT_LEN: usize = 40;

/// Store key for one (path, algorithm) pair
///
/// Only contains `[a-z0-9-]`, so it is safe in any store namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the store key for an asset path and algorithm
///
/// Hashes the raw OS bytes of the path, so paths that are not valid UTF-8
/// still get distinct keys.
pub fn derive_cache_key(path: &Path, algorithm: Algorithm) -> CacheKey {
    let path_hash = hex::encode(Sha256::digest(path.as_os_str().as_encoded_bytes()));
    CacheKey(format!(
        "sri-{}-{}",
        &path_hash[..PATH_FINGERPRINT_LEN],
        algorithm.as_str()
    ))
}

/// Bounded memo of derived keys
///
/// Keyed by path value, so equal paths built separately share an entry.
pub struct CacheKeyMemo {
    keys: Mutex<LruCache<(PathBuf, Algorithm), CacheKey>>,
}

impl CacheKeyMemo {
    /// Create a memo holding at most `capacity` keys
    ///
    /// # Errors
    /// Returns `InvalidConfig` if capacity is 0
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            SriError::InvalidConfig("Cache key memo capacity must be non-zero".to_string())
        })?;

        Ok(Self {
            keys: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// Return the key for `(path, algorithm)`, deriving it on first use
    pub fn get(&self, path: &Path, algorithm: Algorithm) -> CacheKey {
        let entry = (path.to_path_buf(), algorithm);
        let mut keys = self.keys.lock();
        if let Some(key) = keys.get(&entry) {
            return key.clone();
        }

        let key = derive_cache_key(path, algorithm);
        keys.put(entry, key.clone());
        key
    }

    /// Number of memoized keys
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}
