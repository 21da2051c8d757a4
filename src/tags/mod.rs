//! HTML tags carrying integrity attributes

mod attrs;
mod render;

pub use attrs::{escape_attr, format_attrs, ExtraAttribute, TagAttrs};
pub use render::{sri_css, sri_js, SriTags};
