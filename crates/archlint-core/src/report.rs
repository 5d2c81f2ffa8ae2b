//! Plain-text and JSON rendering of findings.
//!
//! Both renderings are lossless projections of the finding list; neither
//! reorders or filters it.

use std::io::Write;

use crate::types::Finding;

/// Errors while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing findings failed.
    #[error("Failed to serialize findings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders findings as one tab-separated line each:
/// `ruleId`, severity, path, message, and the metadata as JSON when present.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_text<W: Write>(mut w: W, findings: &[Finding]) -> Result<(), ReportError> {
    if findings.is_empty() {
        writeln!(w, "No findings")?;
        return Ok(());
    }
    for f in findings {
        write!(w, "{}\t{}\t{}\t{}", f.rule_id, f.severity, f.path, f.message)?;
        if !f.meta.is_empty() {
            write!(w, "\t{}", serde_json::to_string(&f.meta)?)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Renders findings as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(mut w: W, findings: &[Finding]) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut w, findings)?;
    writeln!(w)?;
    Ok(())
}
