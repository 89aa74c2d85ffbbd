//! Scan selection and results
//!
//! A [`ScanPlan`] is validated before any network activity: it needs a
//! non-blank search term and at least one scan mode.

use crate::filter::FilterOptions;
use crate::output::{FindingSet, ResultSink};
use crate::SearchMasterError;
use std::path::PathBuf;

/// A scan stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanMode {
    /// One query per dork template, each combined with the term
    Dork,

    /// A single query equal to the raw term
    Normal,
}

impl ScanMode {
    /// Lower-case name used in log messages
    pub fn label(&self) -> &'static str {
        match self {
            ScanMode::Dork => "dork",
            ScanMode::Normal => "normal",
        }
    }

    /// Section title for a completed stage
    pub fn results_title(&self) -> &'static str {
        match self {
            ScanMode::Dork => "Dork Scan Results:",
            ScanMode::Normal => "Normal Scan Results:",
        }
    }

    /// Section title for findings flushed after an interrupt
    pub fn partial_title(&self) -> &'static str {
        match self {
            ScanMode::Dork => "Summary of Dork Results (Collected so far):",
            ScanMode::Normal => "Summary of Normal Search Results (Collected so far):",
        }
    }
}

/// What to scan for and how to finalize each stage
#[derive(Debug, Clone)]
pub struct ScanPlan {
    /// The search term, also the content-match needle
    pub term: String,

    /// Stages to run, in order
    pub modes: Vec<ScanMode>,

    /// Post-filters applied to each completed stage
    pub filters: FilterOptions,

    /// File each completed stage is written to
    pub output: Option<PathBuf>,
}

impl ScanPlan {
    /// Builds a plan from the scan-type toggles
    ///
    /// `all` selects both stages. The dork stage always runs first.
    ///
    /// # Returns
    ///
    /// * `Ok(ScanPlan)` - Valid plan without filters or output
    /// * `Err(SearchMasterError::Usage)` - Missing term or no stage selected
    pub fn new(term: Option<&str>, dork: bool, normal: bool, all: bool) -> crate::Result<Self> {
        let term = match term {
            Some(term) if !term.trim().is_empty() => term.to_string(),
            _ => {
                return Err(SearchMasterError::Usage(
                    "Search term is required.".to_string(),
                ))
            }
        };

        let mut modes = Vec::new();
        if dork || all {
            modes.push(ScanMode::Dork);
        }
        if normal || all {
            modes.push(ScanMode::Normal);
        }

        if modes.is_empty() {
            return Err(SearchMasterError::Usage(
                "At least one scan type must be specified.".to_string(),
            ));
        }

        Ok(Self {
            term,
            modes,
            filters: FilterOptions::default(),
            output: None,
        })
    }

    pub fn with_filters(mut self, filters: FilterOptions) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

/// Findings of one stage and whether it was cut short
#[derive(Debug, Clone, Default)]
pub struct StageOutcome {
    pub findings: FindingSet,
    pub interrupted: bool,
}

/// Findings of a whole run
///
/// A stage that never started has no entry. After an interrupt the
/// interrupted stage holds its unfiltered partial findings.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub dork: Option<FindingSet>,
    pub normal: Option<FindingSet>,
    pub interrupted: bool,
}

impl ScanReport {
    /// Findings recorded for `mode`, if that stage ran
    pub fn findings(&self, mode: ScanMode) -> Option<&FindingSet> {
        match mode {
            ScanMode::Dork => self.dork.as_ref(),
            ScanMode::Normal => self.normal.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, mode: ScanMode, findings: FindingSet) {
        match mode {
            ScanMode::Dork => self.dork = Some(findings),
            ScanMode::Normal => self.normal = Some(findings),
        }
    }

    /// Renders whatever both stages collected, under the partial titles
    pub fn render_partial(&self, sink: &dyn ResultSink) {
        let empty = FindingSet::new();
        for mode in [ScanMode::Dork, ScanMode::Normal] {
            sink.render(
                mode.partial_title(),
                self.findings(mode).unwrap_or(&empty),
            );
        }
    }
}
