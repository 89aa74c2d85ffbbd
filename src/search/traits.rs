//! Search provider trait

use async_trait::async_trait;

/// Trait for search backends
///
/// A provider turns a query into candidate URLs, best relevance first.
/// Implementations report backend failures as
/// [`SearchMasterError::Provider`](crate::SearchMasterError::Provider).
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short identifier used in log messages
    fn name(&self) -> &str;

    /// Returns at most `limit` candidate URLs for `query`
    async fn search(&self, query: &str, limit: usize) -> crate::Result<Vec<String>>;
}
