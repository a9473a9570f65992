//! Configuration module

mod site;

pub use site::{MarkdownConfig, SiteConfig, SiteInfo, DEFAULT_CONFIG_FILE};
