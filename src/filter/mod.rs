//! Post-filters over finding sets
//!
//! Each filter is a pure function producing a new set; the input is left
//! untouched. Filters keep the relative order of the findings they retain
//! and applying one twice gives the same result as applying it once.

use crate::config::FilterConfig;
use crate::output::FindingSet;

/// Keeps findings whose URL contains any of `domains` as a substring
///
/// This is a loose match: a social domain anywhere in the URL, including
/// the path or query string, qualifies.
pub fn filter_social_media<S: AsRef<str>>(findings: &FindingSet, domains: &[S]) -> FindingSet {
    findings
        .iter()
        .filter(|f| domains.iter().any(|d| f.url.contains(d.as_ref())))
        .cloned()
        .collect()
}

/// Keeps findings whose lower-cased URL ends with one of `extensions`
pub fn filter_files<S: AsRef<str>>(findings: &FindingSet, extensions: &[S]) -> FindingSet {
    findings
        .iter()
        .filter(|f| {
            let url = f.url.to_lowercase();
            extensions
                .iter()
                .any(|ext| url.ends_with(&ext.as_ref().to_lowercase()))
        })
        .cloned()
        .collect()
}

/// Filters requested on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Restrict to social-media links
    pub social: bool,

    /// Restrict to document links
    pub files: bool,
}

impl FilterOptions {
    /// Applies the requested filters, social first, then files
    pub fn apply(&self, findings: FindingSet, config: &FilterConfig) -> FindingSet {
        let mut findings = findings;

        if self.social {
            findings = filter_social_media(&findings, &config.social_domains);
        }

        if self.files {
            findings = filter_files(&findings, &config.file_extensions);
        }

        findings
    }
}
