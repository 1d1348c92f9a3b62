//! Content module - post records and how they are loaded

mod excerpt;
mod frontmatter;
pub mod loader;
mod post;

pub use excerpt::{extract_excerpt, MORE_MARKER};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use post::{normalize, normalize_value, PostRecord, RawFrontMatter, DEFAULT_CATEGORY};
