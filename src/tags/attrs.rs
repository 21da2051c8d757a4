//! Tag attribute sets and formatting

use std::collections::BTreeMap;
use std::fmt;

/// Valueless attributes commonly added to asset tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraAttribute {
    Defer,
    Async,
    Preload,
    Prefetch,
}

impl ExtraAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtraAttribute::Defer => "defer",
            ExtraAttribute::Async => "async",
            ExtraAttribute::Preload => "preload",
            ExtraAttribute::Prefetch => "prefetch",
        }
    }
}

impl fmt::Display for ExtraAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes for one tag: bare flags plus `name="value"` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttrs {
    simple: Vec<String>,
    complex: BTreeMap<String, String>,
}

impl TagAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bare attribute
    pub fn flag(mut self, attr: impl Into<String>) -> Self {
        self.simple.push(attr.into());
        self
    }

    /// Set a valued attribute, replacing any previous value
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.complex.insert(name.into(), value.into());
    }

    /// Set a valued attribute only if absent
    pub fn set_default(&mut self, name: &str, value: impl Into<String>) {
        self.complex
            .entry(name.to_string())
            .or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.complex.get(name).map(String::as_str)
    }

    /// Render with a leading space, or as an empty string
    pub fn render(&self) -> String {
        format_attrs(&self.simple, &self.complex)
    }
}

impl From<ExtraAttribute> for String {
    fn from(attr: ExtraAttribute) -> Self {
        attr.as_str().to_string()
    }
}

/// Escape an attribute value for double-quoted HTML
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Flatten attributes into ` a="1" b="2" flag`
///
/// Valued attributes come first, sorted by name; bare ones follow in the
/// order given.
pub fn format_attrs<S: AsRef<str>>(simple: &[S], complex: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (name, value) in complex {
        out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    for attr in simple {
        out.push(' ');
        out.push_str(attr.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_attrs_render_empty() {
        assert_eq!(TagAttrs::new().render(), "");
    }

    #[test]
    fn test_complex_sorted_then_simple() {
        let attrs = TagAttrs::new()
            .flag(ExtraAttribute::Defer)
            .set("src", "/static/app.js")
            .set("crossorigin", "anonymous")
            .flag("nomodule");
        assert_eq!(
            attrs.render(),
            " crossorigin=\"anonymous\" src=\"/static/app.js\" defer nomodule"
        );
    }

    #[test]
    fn test_simple_only_has_leading_space() {
        let attrs = TagAttrs::new().flag(ExtraAttribute::Async);
        assert_eq!(attrs.render(), " async");
    }

    #[test]
    fn test_values_are_escaped() {
        let attrs = TagAttrs::new().set("title", "a \"b\" & <c> 'd'");
        assert_eq!(
            attrs.render(),
            " title=\"a &quot;b&quot; &amp; &lt;c&gt; &#x27;d&#x27;\""
        );
    }

    #[test]
    fn test_set_default_keeps_existing() {
        let mut attrs = TagAttrs::new().set("rel", "preload");
        attrs.set_default("rel", "stylesheet");
        attrs.set_default("type", "text/css");
        assert_eq!(attrs.get("rel"), Some("preload"));
        assert_eq!(attrs.get("type"), Some("text/css"));
    }

    #[test]
    fn test_extra_attribute_names() {
        let names: Vec<&str> = [
            ExtraAttribute::Defer,
            ExtraAttribute::Async,
            ExtraAttribute::Preload,
            ExtraAttribute::Prefetch,
        ]
        .into_iter()
        .map(ExtraAttribute::as_str)
        .collect();
        assert_eq!(names, vec!["defer", "async", "preload", "prefetch"]);
    }
}
