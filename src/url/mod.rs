//! URL helpers for Policy-Crawler
//!
//! Link resolution against a listing page, and host splitting used by the
//! source resolver's region fallback.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, host_segments};
pub use resolve::resolve_link;
