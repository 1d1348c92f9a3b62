//! List posts, tags and categories

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::PostRecord;
use crate::helpers::{
    filter_by_category, filter_by_tag, get_all_categories, get_all_tags, paginate, sort_by_date,
};
use crate::Blog;

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListType {
    #[value(alias = "post")]
    Posts,
    #[value(alias = "tag")]
    Tags,
    #[value(alias = "category")]
    Categories,
}

/// Which page of which posts to show
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: i64,
    /// Falls back to the configured `per_page`
    pub per_page: Option<i64>,
}

/// A tag or category with its post count
#[derive(Debug, Serialize)]
struct TermCount<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    count: usize,
}

/// List site content by type
pub fn run(blog: &Blog, list_type: ListType, query: &PostQuery, json: bool) -> Result<()> {
    let posts = blog.load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let output = match list_type {
        ListType::Posts => render_posts(&blog.config, &posts, query, json)?,
        ListType::Tags => render_tags(&posts, json)?,
        ListType::Categories => render_categories(&blog.config, &posts, json)?,
    };

    println!("{}", output);
    Ok(())
}

/// Newest-first page of posts, optionally narrowed to a category and/or tag
pub fn render_posts(
    config: &SiteConfig,
    posts: &[PostRecord],
    query: &PostQuery,
    json: bool,
) -> Result<String> {
    let mut selected = sort_by_date(posts);
    if let Some(category) = &query.category {
        selected = filter_by_category(&selected, category);
    }
    if let Some(tag) = &query.tag {
        selected = filter_by_tag(&selected, tag);
    }

    let per_page = query
        .per_page
        .unwrap_or_else(|| i64::try_from(config.per_page).unwrap_or(i64::MAX));
    let page = paginate(&selected, query.page, per_page);
    tracing::debug!(
        "Showing page {}/{} of {} posts",
        page.current_page,
        page.total_pages,
        selected.len()
    );

    if json {
        return Ok(serde_json::to_string_pretty(&page)?);
    }

    let mut out = format!("{} - Posts ({}):\n", config.title, selected.len());
    for post in &page.items {
        out.push_str(&format!(
            "  {} - {} [{}]\n",
            display_date(&post.date),
            post.title,
            config.category_label(&post.category)
        ));
    }
    out.push_str(&format!("Page {}/{}", page.current_page, page.total_pages));
    Ok(out)
}

/// Every tag with its post count, most used first
pub fn render_tags(posts: &[PostRecord], json: bool) -> Result<String> {
    let tags = get_all_tags(posts);
    let terms: Vec<TermCount> = ranked(
        tags.iter()
            .map(|(name, count)| TermCount {
                name,
                label: None,
                count: *count,
            })
            .collect(),
    );

    if json {
        return Ok(serde_json::to_string_pretty(&terms)?);
    }

    let mut out = format!("Tags ({}):", terms.len());
    for term in &terms {
        out.push_str(&format!("\n  {} ({})", term.name, term.count));
    }
    Ok(out)
}

/// Every category with its label and post count, most used first
pub fn render_categories(config: &SiteConfig, posts: &[PostRecord], json: bool) -> Result<String> {
    let categories = get_all_categories(posts);
    let terms: Vec<TermCount> = ranked(
        categories
            .iter()
            .map(|(name, count)| TermCount {
                name,
                label: Some(config.category_label(name)),
                count: *count,
            })
            .collect(),
    );

    if json {
        return Ok(serde_json::to_string_pretty(&terms)?);
    }

    let mut out = format!("Categories ({}):", terms.len());
    for term in &terms {
        match term.label {
            Some(label) if label != term.name => {
                out.push_str(&format!("\n  {} - {} ({})", term.name, label, term.count))
            }
            _ => out.push_str(&format!("\n  {} ({})", term.name, term.count)),
        }
    }
    Ok(out)
}

fn ranked(mut terms: Vec<TermCount<'_>>) -> Vec<TermCount<'_>> {
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(b.name)));
    terms
}

fn display_date(date: &str) -> &str {
    if date.is_empty() {
        "----------"
    } else {
        date
    }
}
