//! Digest cache
//!
//! Memoizes digest engine results keyed by asset path and algorithm. The
//! backing store is chosen once from a named registry: the "sri" store when
//! configured, the default in-process store otherwise. Cached values are
//! trusted until the store evicts or clears them.

mod digest_cache;
mod key;
mod storage;

pub use digest_cache::DigestCache;
pub use key::{derive_cache_key, CacheKey, CacheKeyMemo, DEFAULT_KEY_MEMO_CAPACITY};
pub use storage::{
    CacheStore, CacheStores, FileStore, MemoryStore, DEFAULT_CACHE_ALIAS, SRI_CACHE_ALIAS,
};
