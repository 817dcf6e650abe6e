//! Configuration module for Policy-Crawler
//!
//! This module handles loading the site list, and loading, parsing and
//! validating the optional TOML configuration file.
//!
//! # Example
//!
//! ```no_run
//! use policy_crawler::config::{load_config, load_site_list};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! let sites = load_site_list(Path::new("websites.txt")).unwrap();
//! println!("{} sites, cap {}", sites.len(), config.crawler.max_items);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, OutputConfig, OutputMode, DEFAULT_ACCEPT,
    DEFAULT_KEYWORDS, DEFAULT_SINGLE_SITE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_site_list, parse_site_list};
pub use validation::validate;
