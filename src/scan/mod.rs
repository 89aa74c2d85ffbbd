//! Scan module
//!
//! This module drives the acquisition pipeline:
//! - Scan plan validation (term and scan-type selection)
//! - Dork and normal stages over the search provider
//! - Per-stage filtering, saving and rendering
//! - Cooperative cancellation with partial results

mod orchestrator;
mod plan;

pub use orchestrator::Scanner;
pub use plan::{ScanMode, ScanPlan, ScanReport, StageOutcome};
