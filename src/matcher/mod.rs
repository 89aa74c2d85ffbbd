//! Content matching
//!
//! Keeps the fetched pages whose body contains the search term, compared
//! case-insensitively. Survivors keep their input order.

use crate::fetch::{fetch_body, FetchedPage};
use crate::output::Finding;
use reqwest::Client;

/// Case-insensitive substring test of `term` against `body`
pub fn contains_term(body: &str, term: &str) -> bool {
    body.to_lowercase().contains(&term.to_lowercase())
}

/// Re-fetches every finding and keeps those whose body contains `term`
///
/// Any fetch error drops that finding (logged, not propagated).
pub async fn analyze(client: &Client, findings: Vec<Finding>, term: &str) -> Vec<Finding> {
    let mut matched = Vec::new();

    for finding in findings {
        match fetch_body(client, &finding.url).await {
            Ok(body) => {
                if contains_term(&body, term) {
                    matched.push(finding);
                } else {
                    tracing::debug!("Term not found in {}", finding.url);
                }
            }
            Err(e) => tracing::warn!("Error analyzing {}: {}", finding.url, e),
        }
    }

    matched
}

/// Keeps the pages whose already-downloaded body contains `term`
pub fn retain_matching(pages: Vec<FetchedPage>, term: &str) -> Vec<Finding> {
    pages
        .into_iter()
        .filter(|page| {
            let found = contains_term(&page.body, term);
            if !found {
                tracing::debug!("Term not found in {}", page.finding.url);
            }
            found
        })
        .map(|page| page.finding)
        .collect()
}
