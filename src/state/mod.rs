//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `LinkCandidate`: a (title, URL) pair discovered on a listing page
//! - `PolicyRecord`: the structured result for one fetched document
//! - `CrawlState`: the run-wide accumulator owned by the coordinator

mod crawl_state;
mod record;

// Re-export main types
pub use crawl_state::{CrawlState, SiteOutcome};
pub use record::{LinkCandidate, PolicyRecord, CRAWL_TIME_FORMAT};
