//! Post records and front-matter normalization

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Category assigned to posts whose front-matter has none
pub const DEFAULT_CATEGORY: &str = "other";

/// Weakly-typed front-matter as parsed from a document
pub type RawFrontMatter = Mapping;

/// A normalized blog post, as consumed by listing pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    /// Display title
    pub title: String,

    /// Link to the rendered post
    pub url: String,

    /// Publication date, `YYYY-MM-DD`
    pub date: String,

    /// Single classification key
    pub category: String,

    /// Free-form labels in source order
    pub tags: Vec<String>,

    /// Short preview text
    pub excerpt: String,
}

impl Default for PostRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            date: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            tags: Vec::new(),
            excerpt: String::new(),
        }
    }
}

impl PostRecord {
    /// Whether this post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Build a `PostRecord` from raw front-matter.
///
/// Every field is coerced independently: strings pass through, anything else
/// falls back to the field default. `tags` keeps only the string elements of a
/// sequence. This never fails.
pub fn normalize(raw: &RawFrontMatter) -> PostRecord {
    PostRecord {
        title: string_field(raw, "title").unwrap_or_default(),
        url: string_field(raw, "url").unwrap_or_default(),
        date: string_field(raw, "date").unwrap_or_default(),
        category: string_field(raw, "category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        tags: tags_field(raw),
        excerpt: string_field(raw, "excerpt").unwrap_or_default(),
    }
}

/// Like [`normalize`], for a value that may not be a mapping at all
pub fn normalize_value(raw: &Value) -> PostRecord {
    match raw {
        Value::Mapping(map) => normalize(map),
        _ => PostRecord::default(),
    }
}

fn string_field(raw: &RawFrontMatter, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn tags_field(raw: &RawFrontMatter) -> Vec<String> {
    match raw.get("tags") {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
