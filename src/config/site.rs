//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display labels for category keys, in configured order
pub type CategoryLabels = IndexMap<String, String>;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,

    // Directory
    pub source_dir: String,
    pub posts_dir: String,

    // URL
    pub url_prefix: String,

    // Listing
    pub per_page: usize,
    pub excerpt_length: usize,

    // Category
    pub category_labels: CategoryLabels,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),

            source_dir: "docs".to_string(),
            posts_dir: "posts".to_string(),

            url_prefix: "/posts/".to_string(),

            per_page: 10,
            excerpt_length: 200,

            category_labels: default_category_labels(),
        }
    }
}

fn default_category_labels() -> CategoryLabels {
    [
        ("frontend", "前端"),
        ("backend", "后端"),
        ("devops", "DevOps"),
        ("other", "其他"),
    ]
    .into_iter()
    .map(|(key, label)| (key.to_string(), label.to_string()))
    .collect()
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Label to show for `category`; unconfigured categories show as-is
    pub fn category_label<'a>(&'a self, category: &'a str) -> &'a str {
        self.category_labels
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.per_page, 10);
        assert_eq!(config.source_dir, "docs");
        assert_eq!(config.category_label("frontend"), "前端");
        assert_eq!(config.category_label("other"), "其他");
    }

    #[test]
    fn test_unconfigured_category_label() {
        let config = SiteConfig::default();
        assert_eq!(config.category_label("database"), "database");
        assert_eq!(config.category_label("Frontend"), "Frontend");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
per_page: 5
category_labels:
  database: 数据库
  ai: AI
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(
            config.category_labels.keys().collect::<Vec<_>>(),
            vec!["database", "ai"]
        );
        assert_eq!(config.category_label("database"), "数据库");
        assert_eq!(config.category_label("frontend"), "frontend");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(dir.path().join("_config.yml")).is_err());
    }
}
