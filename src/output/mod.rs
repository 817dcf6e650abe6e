//! Output module for persisting crawl results
//!
//! This module handles:
//! - Per-site JSON checkpoints of all records so far
//! - Final JSON, CSV summary and plain-text exports
//! - Run statistics and the end-of-run summary

mod csv;
mod json;
mod sink;
pub mod stats;
mod text;
mod traits;

pub use self::csv::{format_summary_csv, truncate_title};
pub use json::{format_records_json, write_records_json};
pub use sink::{FileSink, MemorySink};
pub use stats::{log_statistics, CrawlStats};
pub use text::format_text_dump;
pub use traits::{FinalExports, OutputError, OutputResult, RecordSink};
