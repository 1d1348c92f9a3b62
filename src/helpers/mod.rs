//! Helper functions for listing pages
//!
//! These are the pure building blocks the home, tag and category listings
//! are assembled from.

mod collection;
mod date;

pub use collection::*;
pub use date::*;
