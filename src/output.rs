//! Output sinks: the import listing and the JSON run report
//!
//! Both are written to a temporary sibling file first and renamed into
//! place, so an interrupted run never leaves a partial file behind.

use crate::booster::{DrawTally, RunReport};
use crate::{BoosterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Listing content: one `<count>x <card>` line per distinct card
pub fn render_listing(tally: &DrawTally) -> String {
    let mut out = String::new();
    for line in tally.lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write the import listing for a finished run
pub fn write_listing(path: &Path, tally: &DrawTally) -> Result<()> {
    write_atomically(path, &render_listing(tally))
}

/// Write the run report as pretty-printed JSON
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| BoosterError::SerializationError(format!("Error serializing run report: {e}")))?;
    write_atomically(path, &json)
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);
    let result = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
