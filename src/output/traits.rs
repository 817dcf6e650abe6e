//! Output sink trait and error types

use crate::state::PolicyRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Paths of the three final export files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalExports {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub txt: PathBuf,
}

/// Destination for crawl records
///
/// The coordinator calls `save_progress` after every site whose link loop ran,
/// always with the full run-wide record sequence, and `save_final` once at the
/// end of the run.
pub trait RecordSink {
    /// Writes a checkpoint of all records so far, tagged with the 1-based
    /// ordinal of the site just finished. Supersedes earlier checkpoints.
    fn save_progress(&mut self, records: &[PolicyRecord], site_ordinal: usize)
        -> OutputResult<()>;

    /// Writes the final exports
    fn save_final(&mut self, records: &[PolicyRecord]) -> OutputResult<FinalExports>;
}
