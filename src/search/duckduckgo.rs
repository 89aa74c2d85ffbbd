//! DuckDuckGo HTML search provider
//!
//! Queries the JavaScript-free HTML endpoint and reads the result anchors.
//! Result links are usually wrapped in a redirect of the form
//! `//duckduckgo.com/l/?uddg=<encoded target>&rut=...`, which is unwrapped
//! to the target URL.

use crate::search::traits::SearchProvider;
use crate::SearchMasterError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Search provider backed by DuckDuckGo's HTML interface
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    client: Client,
    endpoint: Url,
}

impl DuckDuckGoProvider {
    /// Creates a provider sending queries to `endpoint`
    ///
    /// # Returns
    ///
    /// * `Ok(DuckDuckGoProvider)` - Provider ready to use
    /// * `Err(SearchMasterError::Usage)` - The endpoint is not a valid URL
    pub fn new(client: Client, endpoint: &str) -> crate::Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            SearchMasterError::Usage(format!("Invalid search endpoint '{}': {}", endpoint, e))
        })?;

        Ok(Self { client, endpoint })
    }

    fn provider_error(query: &str, message: impl Into<String>) -> SearchMasterError {
        SearchMasterError::Provider {
            query: query.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> crate::Result<Vec<String>> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| Self::provider_error(query, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::provider_error(
                query,
                format!("search endpoint returned status {}", status.as_u16()),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Self::provider_error(query, e.to_string()))?;

        Ok(parse_results(&html, &self.endpoint, limit))
    }
}

/// Extracts up to `limit` result URLs from a DuckDuckGo HTML results page
pub fn parse_results(html: &str, base_url: &Url, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a.result__a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_result_link(href, base_url))
        .take(limit)
        .collect()
}

/// Turns a result href into the target URL
///
/// Returns None for links that are not http(s) once unwrapped, or that
/// still point back at the search engine itself (ads, internal pages).
fn resolve_result_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let link = base_url.join(href).ok()?;

    let target = match link
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
    {
        Some(wrapped) => Url::parse(&wrapped).ok()?,
        None => link,
    };

    if target.scheme() != "http" && target.scheme() != "https" {
        return None;
    }

    if target
        .host_str()
        .is_some_and(|host| host == "duckduckgo.com" || host.ends_with(".duckduckgo.com"))
    {
        return None;
    }

    Some(target.to_string())
}
