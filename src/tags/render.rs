//! `<script>` and `<link>` rendering with integrity attributes

use crate::algorithm::Algorithm;
use crate::cache::DigestCache;
use crate::error::{Result, SriError};
use crate::integrity::calculate_integrity_of_static;
use crate::static_files::StaticResolver;
use crate::tags::attrs::TagAttrs;
use std::path::Path;

/// `<script>` tag; an explicit `src` in `attrs` wins over `url`
pub fn sri_js(url: &str, mut attrs: TagAttrs) -> String {
    attrs.set_default("src", url);
    format!("<script{}></script>", attrs.render())
}

/// Stylesheet `<link>` tag; explicit attributes win over the defaults
pub fn sri_css(url: &str, mut attrs: TagAttrs) -> String {
    attrs.set_default("rel", "stylesheet");
    attrs.set_default("type", "text/css");
    attrs.set_default("href", url);
    format!("<link{}>", attrs.render())
}

#[derive(Debug, Clone, Copy)]
enum TagKind {
    Js,
    Css,
}

impl TagKind {
    fn for_name(name: &str) -> Result<Self> {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("js") => Ok(TagKind::Js),
            Some("css") => Ok(TagKind::Css),
            _ => Err(SriError::UnsupportedExtension(name.to_string())),
        }
    }
}

/// Tag helpers bound to a digest cache, a resolver and defaults
pub struct SriTags {
    cache: DigestCache,
    resolver: Box<dyn StaticResolver>,
    algorithm: Algorithm,
    use_sri: bool,
}

impl SriTags {
    pub fn new(
        cache: DigestCache,
        resolver: Box<dyn StaticResolver>,
        algorithm: Algorithm,
        use_sri: bool,
    ) -> Self {
        Self {
            cache,
            resolver,
            algorithm,
            use_sri,
        }
    }

    pub fn cache(&self) -> &DigestCache {
        &self.cache
    }

    pub fn resolver(&self) -> &dyn StaticResolver {
        self.resolver.as_ref()
    }

    pub fn use_sri(&self) -> bool {
        self.use_sri
    }

    /// Parse an explicit algorithm or fall back to the configured default
    pub fn algorithm(&self, algorithm: Option<&str>) -> Result<Algorithm> {
        algorithm.map_or(Ok(self.algorithm), Algorithm::parse)
    }

    /// Integrity string for a logical static asset
    pub fn sri_integrity_static(&self, name: &str, algorithm: Option<&str>) -> Result<String> {
        let algorithm = self.algorithm(algorithm)?;
        let integrity =
            calculate_integrity_of_static(&self.cache, self.resolver.as_ref(), name, algorithm)?;
        Ok(integrity.to_string())
    }

    /// Script or stylesheet tag for a logical static asset
    ///
    /// With SRI disabled no digest is computed and the tag carries neither
    /// `integrity` nor a default `crossorigin`.
    pub fn sri_static(
        &self,
        name: &str,
        algorithm: Option<&str>,
        mut attrs: TagAttrs,
    ) -> Result<String> {
        let kind = TagKind::for_name(name)?;

        if self.use_sri {
            attrs.set_default("crossorigin", "anonymous");
            attrs.insert("integrity", self.sri_integrity_static(name, algorithm)?);
        }

        let url = self.resolver.url(name);
        Ok(match kind {
            TagKind::Js => sri_js(&url, attrs),
            TagKind::Css => sri_css(&url, attrs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStores;
    use crate::static_files::{StaticFinder, DEFAULT_STATIC_URL};
    use crate::tags::attrs::ExtraAttribute;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const JS_INTEGRITY: &str = "sha256-V7Q9/DwmqvdPGQ4dy6ncNMsD52hvmuqtLSJ0fK6Mdr8=";

    fn tags_for(temp: &TempDir, use_sri: bool) -> SriTags {
        fs::write(temp.path().join("index.js"), "console.log('hi');").unwrap();
        fs::write(temp.path().join("index.css"), "body { color: red; }").unwrap();
        fs::write(temp.path().join("logo.svg"), "<svg/>").unwrap();

        let finder = StaticFinder::new(vec![temp.path().to_path_buf()], DEFAULT_STATIC_URL);
        let cache = DigestCache::new(&CacheStores::in_memory(), 16).unwrap();
        SriTags::new(cache, Box::new(finder), Algorithm::Sha256, use_sri)
    }

    #[test]
    fn test_plain_js_tag() {
        assert_eq!(
            sri_js("/static/a.js", TagAttrs::new()),
            "<script src=\"/static/a.js\"></script>"
        );
    }

    #[test]
    fn test_plain_css_tag() {
        assert_eq!(
            sri_css("/static/a.css", TagAttrs::new()),
            "<link href=\"/static/a.css\" rel=\"stylesheet\" type=\"text/css\">"
        );
    }

    #[test]
    fn test_explicit_src_wins() {
        let attrs = TagAttrs::new().set("src", "https://cdn.example.com/a.js");
        assert_eq!(
            sri_js("/static/a.js", attrs),
            "<script src=\"https://cdn.example.com/a.js\"></script>"
        );
    }

    #[test]
    fn test_sri_static_js() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, true);
        let html = tags
            .sri_static("index.js", None, TagAttrs::new().flag(ExtraAttribute::Defer))
            .unwrap();
        assert_eq!(
            html,
            format!(
                "<script crossorigin=\"anonymous\" integrity=\"{}\" src=\"/static/index.js\" defer></script>",
                JS_INTEGRITY
            )
        );
    }

    #[test]
    fn test_sri_static_css_with_algorithm() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, true);
        let html = tags
            .sri_static("index.css", Some("sha384"), TagAttrs::new())
            .unwrap();
        assert_eq!(
            html,
            "<link crossorigin=\"anonymous\" href=\"/static/index.css\" \
             integrity=\"sha384-BN8siYsJqlPeNsRFs2pYbTW0uiUBy9v6JVVKpHaS+KNqD0ZFotD5OFKMkI6/s6sb\" \
             rel=\"stylesheet\" type=\"text/css\">"
        );
    }

    #[test]
    fn test_sri_static_keeps_caller_crossorigin() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, true);
        let html = tags
            .sri_static(
                "index.js",
                None,
                TagAttrs::new().set("crossorigin", "use-credentials"),
            )
            .unwrap();
        assert!(html.contains("crossorigin=\"use-credentials\""));
        assert!(html.contains(JS_INTEGRITY));
    }

    #[test]
    fn test_sri_disabled_omits_integrity() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, false);
        let html = tags.sri_static("index.js", None, TagAttrs::new()).unwrap();
        assert_eq!(html, "<script src=\"/static/index.js\"></script>");
    }

    #[test]
    fn test_sri_static_quotes_url() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, false);
        fs::write(temp.path().join("my app.js"), "x").unwrap();
        let html = tags.sri_static("my app.js", None, TagAttrs::new()).unwrap();
        assert_eq!(html, "<script src=\"/static/my%20app.js\"></script>");
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, true);
        assert!(matches!(
            tags.sri_static("logo.svg", None, TagAttrs::new()),
            Err(SriError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_unsupported_algorithm() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, true);
        assert!(matches!(
            tags.sri_integrity_static("index.js", Some("md5")),
            Err(SriError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_integrity_uses_default_algorithm() {
        let temp = TempDir::new().unwrap();
        let tags = tags_for(&temp, true);
        assert_eq!(
            tags.sri_integrity_static("index.js", None).unwrap(),
            JS_INTEGRITY
        );
    }
}
