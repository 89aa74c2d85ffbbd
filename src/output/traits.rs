//! Finding types and the result sink trait
//!
//! This module defines the records produced by a scan and the interface
//! the orchestrator uses to present and persist them.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Title used when a page has no `<title>` element
pub const NO_TITLE: &str = "No Title";

/// A page that passed both the HTML check and the content match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The candidate URL as returned by the search provider
    pub url: String,

    /// The page title, or [`NO_TITLE`]
    pub title: String,
}

impl Finding {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Ordered findings of one scan mode
///
/// Only ever appended to during acquisition. Filters build a new set
/// instead of modifying this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingSet {
    findings: Vec<Finding>,
}

impl FindingSet {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    pub fn as_slice(&self) -> &[Finding] {
        &self.findings
    }
}

impl From<Vec<Finding>> for FindingSet {
    fn from(findings: Vec<Finding>) -> Self {
        Self { findings }
    }
}

impl FromIterator<Finding> for FindingSet {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self {
            findings: iter.into_iter().collect(),
        }
    }
}

impl Extend<Finding> for FindingSet {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        self.findings.extend(iter);
    }
}

impl IntoIterator for FindingSet {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a FindingSet {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

/// Trait for result sinks
///
/// A sink receives each finalized finding set. Rendering cannot fail;
/// saving reports I/O errors so the caller can abort just that step.
pub trait ResultSink {
    /// Presents a finding set under a section title
    fn render(&self, title: &str, findings: &FindingSet);

    /// Persists a finding set to `path`, replacing any existing content
    fn save(&self, path: &Path, findings: &FindingSet) -> OutputResult<()>;
}
