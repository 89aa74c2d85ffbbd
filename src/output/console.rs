//! Console rendering of finding sets

use crate::output::traits::{FindingSet, OutputResult, ResultSink};
use crate::output::file::save_findings;
use colored::Colorize;
use std::path::Path;

/// Width of the separator printed after each finding
pub const SEPARATOR_WIDTH: usize = 80;

/// Renders a finding set as console text
///
/// Each finding is listed with its 1-based index, title, URL and a
/// separator line. An empty set renders a "No results found." notice.
pub fn render_findings(title: &str, findings: &FindingSet) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", title.yellow()));

    if findings.is_empty() {
        out.push_str(&format!("{}\n", "No results found.".red()));
    } else {
        for (i, finding) in findings.iter().enumerate() {
            out.push_str(&format!(
                "{}\n",
                format!("{}. {}", i + 1, finding.title).green()
            ));
            out.push_str(&format!(
                "{}\n",
                format!("   URL: {}", finding.url).green()
            ));
            out.push_str(&"-".repeat(SEPARATOR_WIDTH));
            out.push('\n');
        }
    }

    out
}

/// Prints a finding set to stdout
pub fn print_findings(title: &str, findings: &FindingSet) {
    println!("{}", render_findings(title, findings));
}

/// Result sink writing to the terminal and to flat files
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn render(&self, title: &str, findings: &FindingSet) {
        print_findings(title, findings);
    }

    fn save(&self, path: &Path, findings: &FindingSet) -> OutputResult<()> {
        save_findings(path, findings)?;
        println!("{}", format!("Results saved to {}", path.display()).cyan());
        Ok(())
    }
}
