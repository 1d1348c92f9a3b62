//! Content loader - turns markdown files into post records

use anyhow::Result;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use super::excerpt::extract_excerpt;
use super::frontmatter::{FrontMatter, FrontMatterError};
use super::post::{normalize, PostRecord};
use crate::helpers::is_canonical_date;
use crate::Blog;

/// Why a single post file could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
}

/// Loads post records from the posts directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load every published post, in file path order.
    ///
    /// Files that fail to load are logged and skipped.
    pub fn load_posts(&self) -> Result<Vec<PostRecord>> {
        let posts_dir = &self.blog.posts_dir;
        if !posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(posts_dir.as_path());
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);
        Ok(posts)
    }

    /// Load a single post; drafts yield `None`
    fn load_post(&self, path: &Path) -> Result<Option<PostRecord>, LoadError> {
        let content = fs::read_to_string(path)?;
        let (mut raw, body) = FrontMatter::parse(&content)?;

        if matches!(raw.get("draft"), Some(Value::Bool(true))) {
            return Ok(None);
        }

        if !matches!(raw.get("url"), Some(Value::String(_))) {
            raw.insert("url".into(), self.derive_url(path).into());
        }

        if !matches!(raw.get("excerpt"), Some(Value::String(_))) {
            let excerpt = extract_excerpt(body, self.blog.config.excerpt_length);
            raw.insert("excerpt".into(), excerpt.into());
        }

        let post = normalize(&raw);
        if !is_canonical_date(&post.date) {
            tracing::debug!(
                "Post {:?} has date {:?}, expected YYYY-MM-DD",
                path,
                post.date
            );
        }

        Ok(Some(post))
    }

    /// Url for a post without one: `url_prefix` + slugified file stem
    fn derive_url(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        format!("{}{}.html", self.blog.config.url_prefix, slug::slugify(stem))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn site() -> (TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        fs::create_dir_all(&blog.posts_dir).unwrap();
        (dir, blog)
    }

    fn write(blog: &Blog, name: &str, content: &str) -> PathBuf {
        let path = blog.posts_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_posts() {
        let (_dir, blog) = site();
        write(
            &blog,
            "b-vue-tips.md",
            "---\ntitle: Vue Tips\ndate: 2024-06-01\ncategory: frontend\ntags: [vue, css]\nexcerpt: Hand written\n---\n\nBody text.\n",
        );
        write(
            &blog,
            "a-first.md",
            "---\ntitle: First Post\ndate: 2024-01-01\n---\n\nOpening paragraph.\n\nMore.\n",
        );
        write(&blog, "notes.txt", "not a post");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 2);

        let first = &posts[0];
        assert_eq!(first.title, "First Post");
        assert_eq!(first.url, "/posts/a-first.html");
        assert_eq!(first.category, "other");
        assert!(first.tags.is_empty());
        assert_eq!(first.excerpt, "Opening paragraph.");

        let second = &posts[1];
        assert_eq!(second.title, "Vue Tips");
        assert_eq!(second.category, "frontend");
        assert_eq!(second.tags, vec!["vue", "css"]);
        assert_eq!(second.excerpt, "Hand written");
    }

    #[test]
    fn test_explicit_url_kept() {
        let (_dir, blog) = site();
        write(&blog, "x.md", "---\ntitle: X\nurl: /custom/x\n---\nBody");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts[0].url, "/custom/x");
    }

    #[test]
    fn test_nested_dirs_and_drafts() {
        let (_dir, blog) = site();
        write(&blog, "2024/Hello World.markdown", "---\ntitle: Nested\n---\nBody");
        write(&blog, "wip.md", "---\ntitle: WIP\ndraft: true\n---\nBody");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Nested");
        assert_eq!(posts[0].url, "/posts/hello-world.html");
    }

    #[test]
    fn test_bad_files_are_skipped() {
        let (_dir, blog) = site();
        write(&blog, "broken.md", ";;;\n{\"title\": nope}\n;;;\nBody");
        write(&blog, "fine.md", "---\ntitle: Fine\n---\nBody");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Fine");
    }

    #[test]
    fn test_template_syntax_without_front_matter() {
        let (_dir, blog) = site();
        write(&blog, "a.md", "{% raw %}\nHello\n");
        write(&blog, "b.md", "{{ $frontmatter.title }}\n\nIntro text.\n");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].url, "/posts/a.html");
        assert_eq!(posts[0].category, "other");
        assert_eq!(posts[1].url, "/posts/b.html");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_are_skipped() {
        let (_dir, blog) = site();
        write(&blog, "fine.md", "---\ntitle: Fine\n---\nBody");
        std::os::unix::fs::symlink(&blog.posts_dir, blog.posts_dir.join("loop")).unwrap();

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Fine");
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());
    }
}
