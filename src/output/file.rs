//! Flat-file persistence of finding sets
//!
//! # File Format
//!
//! Three lines per finding, in set order:
//!
//! ```text
//! Title: <title>
//! URL: <url>
//! --------------------------------------------------------------------------------
//! ```

use crate::output::console::SEPARATOR_WIDTH;
use crate::output::traits::{FindingSet, OutputError, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a finding set to `path`, creating or truncating the file
///
/// # Arguments
///
/// * `path` - Destination file
/// * `findings` - The findings to write
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError::Write)` - The path is not writable
pub fn save_findings(path: &Path, findings: &FindingSet) -> OutputResult<()> {
    let wrap = |source: std::io::Error| OutputError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);

    for finding in findings {
        writeln!(writer, "Title: {}", finding.title).map_err(wrap)?;
        writeln!(writer, "URL: {}", finding.url).map_err(wrap)?;
        writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH)).map_err(wrap)?;
    }

    writer.flush().map_err(wrap)?;
    tracing::debug!("Wrote {} findings to {}", findings.len(), path.display());

    Ok(())
}
