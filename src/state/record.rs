/// Record types produced by link discovery and document extraction
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp layout of `PolicyRecord::crawl_time`
pub const CRAWL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A policy link discovered on a listing page, not yet fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Trimmed anchor text
    pub title: String,

    /// Absolute document URL
    pub url: String,
}

/// One successfully fetched and parsed policy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub title: String,
    pub url: String,

    /// `YYYY-MM-DD`, or `未知日期` when no date label was found
    pub publication_date: String,

    /// Normalized issuing agency
    pub source: String,

    /// Listing page the document was discovered on
    pub website: String,

    pub content: String,

    /// Content length in characters
    pub content_length: usize,

    /// Local time the record was built
    pub crawl_time: String,
}

impl PolicyRecord {
    /// Builds a record for `candidate`, stamping the current local time
    pub fn new(
        candidate: LinkCandidate,
        website: &str,
        publication_date: String,
        source: String,
        content: String,
    ) -> Self {
        let content_length = content.chars().count();

        Self {
            title: candidate.title,
            url: candidate.url,
            publication_date,
            source,
            website: website.to_string(),
            content,
            content_length,
            crawl_time: Local::now().format(CRAWL_TIME_FORMAT).to_string(),
        }
    }
}
