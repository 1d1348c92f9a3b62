//! Configuration module

mod site;

pub use site::CategoryLabels;
pub use site::SiteConfig;
