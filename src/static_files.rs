//! Static asset resolution
//!
//! Maps logical static names (the ones a template would pass to a `static`
//! helper, e.g. `js/app.js`) to files on disk and to public URLs.

use crate::error::{Result, SriError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Component, Path, PathBuf};

/// Default public prefix for static assets
pub const DEFAULT_STATIC_URL: &str = "/static/";

/// Bytes quoted inside one URL path segment: all but unreserved characters
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Resolves logical static names
pub trait StaticResolver: Send + Sync {
    /// Filesystem path backing `name`
    ///
    /// # Errors
    /// `NotFound` if no file backs the name
    fn resolve(&self, name: &str) -> Result<PathBuf>;

    /// Public URL for `name`
    fn url(&self, name: &str) -> String;
}

/// Searches an ordered list of static roots; the first match wins
#[derive(Debug, Clone)]
pub struct StaticFinder {
    roots: Vec<PathBuf>,
    static_url: String,
}

impl StaticFinder {
    pub fn new(roots: Vec<PathBuf>, static_url: impl Into<String>) -> Self {
        Self {
            roots,
            static_url: static_url.into(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Relative path for a logical name, or None if it escapes the root
    fn relative_path(name: &str) -> Option<PathBuf> {
        let trimmed = name.trim_start_matches('/');
        if trimmed.is_empty() {
            return None;
        }

        let relative = Path::new(trimmed);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        safe.then(|| relative.to_path_buf())
    }
}

impl StaticResolver for StaticFinder {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Self::relative_path(name).ok_or_else(|| SriError::NotFound(name.into()))?;

        self.roots
            .iter()
            .map(|root| root.join(&relative))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| SriError::NotFound(name.to_string()))
    }

    fn url(&self, name: &str) -> String {
        let quoted: Vec<String> = name
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect();
        format!(
            "{}/{}",
            self.static_url.trim_end_matches('/'),
            quoted.join("/")
        )
    }
}
