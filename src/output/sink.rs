//! Record sinks
//!
//! `FileSink` writes checkpoints and final exports to an output directory.
//! `MemorySink` keeps copies in memory and backs tests and dry runs.

use crate::config::OutputMode;
use crate::output::csv::format_summary_csv;
use crate::output::json::write_records_json;
use crate::output::text::format_text_dump;
use crate::output::traits::{FinalExports, OutputResult, RecordSink};
use crate::state::PolicyRecord;
use chrono::Local;
use std::fs;
use std::path::PathBuf;

/// Timestamp embedded in multi-site export names
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes records to files under one directory
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
    mode: OutputMode,
}

impl FileSink {
    /// Creates a sink writing to `directory` with the given layout
    ///
    /// The directory is created on first write.
    pub fn new(directory: impl Into<PathBuf>, mode: OutputMode) -> Self {
        Self {
            directory: directory.into(),
            mode,
        }
    }

    /// Path of the checkpoint written after site `site_ordinal`
    pub fn checkpoint_path(&self, site_ordinal: usize) -> PathBuf {
        self.directory
            .join(format!("progress_after_website_{}.json", site_ordinal))
    }

    /// Paths of the final exports for this sink's layout
    ///
    /// Multi-site names carry `timestamp`; single-site names are fixed.
    pub fn export_paths(&self, timestamp: &str) -> FinalExports {
        match self.mode {
            OutputMode::MultiSite => FinalExports {
                json: self
                    .directory
                    .join(format!("policies_all_websites_{}.json", timestamp)),
                csv: self
                    .directory
                    .join(format!("policies_summary_{}.csv", timestamp)),
                txt: self
                    .directory
                    .join(format!("policy_contents_{}.txt", timestamp)),
            },
            OutputMode::SingleSite => FinalExports {
                json: self.directory.join("policies_with_content.json"),
                csv: self.directory.join("policies_summary.csv"),
                txt: self.directory.join("policy_contents.txt"),
            },
        }
    }
}

impl RecordSink for FileSink {
    fn save_progress(
        &mut self,
        records: &[PolicyRecord],
        site_ordinal: usize,
    ) -> OutputResult<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.checkpoint_path(site_ordinal);
        write_records_json(records, &path)?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Saved progress checkpoint"
        );
        Ok(())
    }

    fn save_final(&mut self, records: &[PolicyRecord]) -> OutputResult<FinalExports> {
        fs::create_dir_all(&self.directory)?;
        let timestamp = Local::now().format(EXPORT_TIMESTAMP_FORMAT).to_string();
        let exports = self.export_paths(&timestamp);

        write_records_json(records, &exports.json)?;
        tracing::info!(path = %exports.json.display(), "Saved full records");

        fs::write(&exports.csv, format_summary_csv(records, self.mode))?;
        tracing::info!(path = %exports.csv.display(), "Saved summary table");

        fs::write(&exports.txt, format_text_dump(records, self.mode))?;
        tracing::info!(path = %exports.txt.display(), "Saved text dump");

        Ok(exports)
    }
}

/// Keeps every checkpoint and the final record set in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// `(site_ordinal, record count)` for each checkpoint, in call order
    pub checkpoints: Vec<(usize, usize)>,

    /// Records passed to `save_final`, if it was called
    pub final_records: Option<Vec<PolicyRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn save_progress(
        &mut self,
        records: &[PolicyRecord],
        site_ordinal: usize,
    ) -> OutputResult<()> {
        self.checkpoints.push((site_ordinal, records.len()));
        Ok(())
    }

    fn save_final(&mut self, records: &[PolicyRecord]) -> OutputResult<FinalExports> {
        self.final_records = Some(records.to_vec());
        Ok(FinalExports {
            json: PathBuf::new(),
            csv: PathBuf::new(),
            txt: PathBuf::new(),
        })
    }
}
