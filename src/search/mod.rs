//! Search providers
//!
//! The provider is the only source of candidate URLs. A failing provider
//! never aborts a scan: [`acquire_candidates`] logs the error and yields no
//! candidates for that query.

mod duckduckgo;
mod traits;

pub use duckduckgo::{parse_results, DuckDuckGoProvider};
pub use traits::SearchProvider;

/// Runs `query` against `provider`, isolating provider failures
///
/// # Returns
///
/// Up to `limit` candidate URLs in provider order, or an empty list when
/// the provider failed.
pub async fn acquire_candidates(
    provider: &dyn SearchProvider,
    query: &str,
    limit: usize,
) -> Vec<String> {
    match provider.search(query, limit).await {
        Ok(mut urls) => {
            urls.truncate(limit);
            tracing::info!(
                "{} returned {} candidates for: {}",
                provider.name(),
                urls.len(),
                query
            );
            urls
        }
        Err(e) => {
            tracing::error!("Error during search: {}", e);
            Vec::new()
        }
    }
}
