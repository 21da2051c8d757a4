//! Integrity string composition

use crate::algorithm::Algorithm;
use crate::cache::DigestCache;
use crate::error::Result;
use crate::static_files::StaticResolver;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Compose `<algorithm>-<digest>`
pub fn format_integrity(algorithm: Algorithm, digest: &str) -> String {
    format!("{}-{}", algorithm.as_str(), digest)
}

/// Algorithm and base64 digest of one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Integrity {
    pub algorithm: Algorithm,
    pub digest: String,
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_integrity(self.algorithm, &self.digest))
    }
}

/// Integrity of the file at `path`
pub fn calculate_integrity(
    cache: &DigestCache,
    path: &Path,
    algorithm: Algorithm,
) -> Result<Integrity> {
    let digest = cache.get_or_compute(path, algorithm)?;
    Ok(Integrity { algorithm, digest })
}

/// Integrity of a logical static asset
pub fn calculate_integrity_of_static(
    cache: &DigestCache,
    resolver: &dyn StaticResolver,
    name: &str,
    algorithm: Algorithm,
) -> Result<Integrity> {
    let path = resolver.resolve(name)?;
    calculate_integrity(cache, &path, algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStores;
    use crate::error::SriError;
    use crate::static_files::{StaticFinder, DEFAULT_STATIC_URL};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_prefix_for_every_algorithm() {
        for algorithm in Algorithm::ALL {
            let value = format_integrity(algorithm, "abc=");
            assert!(value.starts_with(&format!("{}-", algorithm.as_str())));
            assert!(value.ends_with("abc="));
        }
    }

    #[test]
    fn test_display_matches_format() {
        let integrity = Integrity {
            algorithm: Algorithm::Sha384,
            digest: "xyz".to_string(),
        };
        assert_eq!(
            integrity.to_string(),
            format_integrity(Algorithm::Sha384, "xyz")
        );
    }

    #[test]
    fn test_calculate_integrity_of_static() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.js"), "console.log('hi');").unwrap();
        let finder = StaticFinder::new(vec![temp.path().to_path_buf()], DEFAULT_STATIC_URL);
        let cache = DigestCache::new(&CacheStores::in_memory(), 16).unwrap();

        let integrity =
            calculate_integrity_of_static(&cache, &finder, "index.js", Algorithm::Sha256).unwrap();
        assert_eq!(
            integrity.to_string(),
            "sha256-V7Q9/DwmqvdPGQ4dy6ncNMsD52hvmuqtLSJ0fK6Mdr8="
        );
    }

    #[test]
    fn test_unknown_static_is_not_found() {
        let temp = TempDir::new().unwrap();
        let finder = StaticFinder::new(vec![temp.path().to_path_buf()], DEFAULT_STATIC_URL);
        let cache = DigestCache::new(&CacheStores::in_memory(), 16).unwrap();

        let result = calculate_integrity_of_static(&cache, &finder, "gone.js", Algorithm::Sha256);
        assert!(matches!(result, Err(SriError::NotFound(_))));
    }
}
