//! Crawler module for listing and document page processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-request timeouts
//! - HTML parsing and policy link discovery
//! - Content, date and source extraction from document pages
//! - Overall crawl coordination

mod coordinator;
mod extract;
mod fetcher;
mod links;
mod parser;
mod source;

pub use coordinator::{
    apply_single_site_defaults, run_crawl, run_single_site, Coordinator, SINGLE_SITE_LINK_LIMIT,
};
pub use extract::{
    extract_policy_content, extract_publication_date, extract_source_from_meta,
    CONTENT_UNAVAILABLE, UNKNOWN_DATE,
};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use links::{extract_policy_links, qualifies};
pub use parser::{block_text, page_text, parse_html, parse_selectors};
pub use source::{
    clean_source_name, extract_source, source_from_url, DEFAULT_SOURCE, UNKNOWN_SOURCE,
};
