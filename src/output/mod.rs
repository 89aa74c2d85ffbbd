//! Output module for presenting and persisting scan findings
//!
//! This module handles:
//! - The `Finding` / `FindingSet` records produced by a scan
//! - Colored console rendering of a finding set
//! - Flat-file persistence of a finding set

mod console;
mod file;
mod traits;

pub use console::{print_findings, render_findings, ConsoleSink, SEPARATOR_WIDTH};
pub use file::save_findings;
pub use traits::{Finding, FindingSet, OutputError, OutputResult, ResultSink, NO_TITLE};
