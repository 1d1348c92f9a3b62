//! Sorting, filtering, pagination and counting over post lists
//!
//! Every function here is pure: inputs are borrowed, results are new
//! collections, and no argument value can make them fail.

use std::cmp::Reverse;
use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::date::parse_post_date;
use crate::content::PostRecord;

/// One page of a post listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated {
    pub items: Vec<PostRecord>,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Sort posts newest first.
///
/// The sort is stable, so posts sharing a date keep their input order. Posts
/// whose date cannot be parsed go after every dated post.
pub fn sort_by_date(posts: &[PostRecord]) -> Vec<PostRecord> {
    let mut keyed: Vec<_> = posts
        .iter()
        .map(|post| (Reverse(parse_post_date(&post.date)), post))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, post)| post.clone()).collect()
}

/// Posts whose category is exactly `category`
pub fn filter_by_category(posts: &[PostRecord], category: &str) -> Vec<PostRecord> {
    posts
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect()
}

/// Posts tagged with exactly `tag`
pub fn filter_by_tag(posts: &[PostRecord], tag: &str) -> Vec<PostRecord> {
    posts.iter().filter(|p| p.has_tag(tag)).cloned().collect()
}

/// Cut out page `page` (1-based) of `page_size` posts.
///
/// `page_size` below 1 counts as 1 and `page` is clamped into
/// `1..=total_pages`. An empty list still has one (empty) page.
pub fn paginate(posts: &[PostRecord], page: i64, page_size: i64) -> Paginated {
    let size = usize::try_from(page_size.max(1)).unwrap_or(usize::MAX);
    let total_pages = posts.len().div_ceil(size).max(1);
    let current_page = usize::try_from(page.max(1))
        .unwrap_or(usize::MAX)
        .min(total_pages);

    let start = ((current_page - 1) * size).min(posts.len());
    let end = start.saturating_add(size).min(posts.len());

    Paginated {
        items: posts[start..end].to_vec(),
        total_pages,
        current_page,
    }
}

/// Number of posts carrying each tag, in order of first appearance.
///
/// A post listing the same tag twice is counted once for it.
pub fn get_all_tags(posts: &[PostRecord]) -> IndexMap<String, usize> {
    let mut tags: IndexMap<String, usize> = IndexMap::new();

    for post in posts {
        let mut seen = HashSet::new();
        for tag in &post.tags {
            if seen.insert(tag.as_str()) {
                *tags.entry(tag.clone()).or_insert(0) += 1;
            }
        }
    }

    tags
}

/// Number of posts in each category, in order of first appearance
pub fn get_all_categories(posts: &[PostRecord]) -> IndexMap<String, usize> {
    let mut categories: IndexMap<String, usize> = IndexMap::new();

    for post in posts {
        *categories.entry(post.category.clone()).or_insert(0) += 1;
    }

    categories
}
