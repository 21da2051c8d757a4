//! Parallel integrity computation over a list of static assets

use crate::config::Config;
use crate::error::{Result, SriError};
use crate::integrity::{calculate_integrity, Integrity};
use crate::tags::{SriTags, TagAttrs};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome for one requested asset
#[derive(Debug, Clone, Serialize)]
pub struct AssetReport {
    /// Logical name as requested
    pub name: String,
    /// Resolved file, when resolution succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<Integrity>,
    /// Rendered HTML tag (tag mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Failure message for this asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssetReport {
    fn failed(name: &str, path: Option<PathBuf>, error: &SriError) -> Self {
        Self {
            name: name.to_string(),
            path,
            integrity: None,
            tag: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Results for a whole run, in request order
#[derive(Debug, Clone, Default)]
pub struct SriResult {
    pub reports: Vec<AssetReport>,
}

impl SriResult {
    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failure()).count()
    }
}

fn process_asset(name: &str, tags: &SriTags, config: &Config) -> AssetReport {
    let path = match tags.resolver().resolve(name) {
        Ok(p) => p,
        Err(e) => return AssetReport::failed(name, None, &e),
    };

    let integrity = if config.use_sri {
        match calculate_integrity(tags.cache(), &path, config.algorithm) {
            Ok(i) => Some(i),
            Err(e) => return AssetReport::failed(name, Some(path), &e),
        }
    } else {
        None
    };

    let tag = if config.emit_tags {
        let algorithm = config.algorithm.as_str();
        match tags.sri_static(name, Some(algorithm), TagAttrs::new()) {
            Ok(t) => Some(t),
            Err(e) => return AssetReport::failed(name, Some(path), &e),
        }
    } else {
        None
    };

    AssetReport {
        name: name.to_string(),
        path: Some(path),
        integrity,
        tag,
        error: None,
    }
}

/// Compute integrity (and optionally tags) for every asset in parallel
///
/// Per-asset failures are recorded in the report rather than aborting the run.
pub fn process_assets(names: &[String], tags: &SriTags, config: &Config) -> Result<SriResult> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()
        .map_err(|e| SriError::Other(format!("Failed to create thread pool: {}", e)))?;

    let reports: Vec<AssetReport> = pool.install(|| {
        names
            .par_iter()
            .map(|name| process_asset(name, tags, config))
            .collect()
    });

    Ok(SriResult { reports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStores, DigestCache};
    use crate::static_files::StaticFinder;
    use std::fs;
    use tempfile::TempDir;

    fn setup(temp: &TempDir, config: &mut Config) -> SriTags {
        fs::write(temp.path().join("index.js"), "console.log('hi');").unwrap();
        fs::write(temp.path().join("index.css"), "body { color: red; }").unwrap();
        config.static_dirs = vec![temp.path().to_path_buf()];
        config.num_threads = 2;

        let cache = DigestCache::new(&CacheStores::in_memory(), 16).unwrap();
        let finder = StaticFinder::new(config.static_dirs.clone(), config.static_url.clone());
        SriTags::new(cache, Box::new(finder), config.algorithm, config.use_sri)
    }

    #[test]
    fn test_reports_keep_request_order() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        let tags = setup(&temp, &mut config);

        let names: Vec<String> = ["index.css", "index.js", "index.css"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let result = process_assets(&names, &tags, &config).unwrap();

        let got: Vec<&str> = result.reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["index.css", "index.js", "index.css"]);
        assert_eq!(result.failed(), 0);
        assert_eq!(
            result.reports[1].integrity.as_ref().unwrap().to_string(),
            "sha256-V7Q9/DwmqvdPGQ4dy6ncNMsD52hvmuqtLSJ0fK6Mdr8="
        );
    }

    #[test]
    fn test_missing_asset_is_reported_not_fatal() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        let tags = setup(&temp, &mut config);

        let names = vec!["missing.js".to_string(), "index.js".to_string()];
        let result = process_assets(&names, &tags, &config).unwrap();

        assert_eq!(result.failed(), 1);
        assert!(result.reports[0].is_failure());
        assert!(result.reports[0].path.is_none());
        assert!(result.reports[1].integrity.is_some());
    }

    #[test]
    fn test_tag_mode_renders_tags() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.emit_tags = true;
        config.algorithm = crate::algorithm::Algorithm::Sha384;
        let tags = setup(&temp, &mut config);

        let names = vec!["index.css".to_string()];
        let result = process_assets(&names, &tags, &config).unwrap();

        let tag = result.reports[0].tag.as_deref().unwrap();
        assert!(tag.starts_with("<link "));
        assert!(tag.contains("integrity=\"sha384-"));
    }

    #[test]
    fn test_tag_mode_without_sri() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.emit_tags = true;
        config.use_sri = false;
        let tags = setup(&temp, &mut config);

        let names = vec!["index.js".to_string()];
        let result = process_assets(&names, &tags, &config).unwrap();

        let report = &result.reports[0];
        assert!(report.integrity.is_none());
        assert_eq!(
            report.tag.as_deref(),
            Some("<script src=\"/static/index.js\"></script>")
        );
    }
}
