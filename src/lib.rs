//! sri-static - Subresource Integrity for static assets
//!
//! Computes base64 SHA-2 digests of static files, memoizes them in a
//! pluggable cache store, and renders `<script>`/`<link>` tags carrying
//! `integrity` attributes.

pub mod algorithm;
pub mod cache;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod export;
pub mod integrity;
pub mod processor;
pub mod static_files;
pub mod tags;

pub use algorithm::Algorithm;
pub use cache::{derive_cache_key, CacheKey, CacheStore, CacheStores, DigestCache};
pub use digest::compute_digest;
pub use error::{Result, SriError};
pub use integrity::{
    calculate_integrity, calculate_integrity_of_static, format_integrity, Integrity,
};
pub use static_files::{StaticFinder, StaticResolver};
pub use tags::{ExtraAttribute, SriTags, TagAttrs};
