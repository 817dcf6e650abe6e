//! JSON serialization of policy records

use crate::output::traits::OutputResult;
use crate::state::PolicyRecord;
use std::fs;
use std::path::Path;

/// Formats records as a pretty-printed JSON array
///
/// Non-ASCII text is written verbatim, not escaped.
pub fn format_records_json(records: &[PolicyRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes records as a JSON array to `path`
pub fn write_records_json(records: &[PolicyRecord], path: &Path) -> OutputResult<()> {
    let json = format_records_json(records)?;
    fs::write(path, json)?;
    Ok(())
}
