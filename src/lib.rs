//! blog-listing: post listings for markdown blogs
//!
//! Loads markdown posts into normalized [`content::PostRecord`]s and provides
//! the pure sorting, filtering, pagination and counting helpers that home,
//! tag and category pages are built from.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

/// A blog site rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Source directory
    pub source_dir: std::path::PathBuf,
    /// Directory holding the posts
    pub posts_dir: std::path::PathBuf,
}

impl Blog {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open the site in `base_dir` with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.as_ref().join(&config.source_dir);
        let posts_dir = source_dir.join(&config.posts_dir);

        Self {
            config,
            source_dir,
            posts_dir,
        }
    }

    /// Load all published posts
    pub fn load_posts(&self) -> Result<Vec<content::PostRecord>> {
        content::loader::ContentLoader::new(self).load_posts()
    }
}
