//! HTTP fetcher implementation
//!
//! This module handles every page request made during a scan:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests with status and Content-Type classification
//! - Title extraction for HTML pages
//!
//! Requests are never retried. A failure only affects the URL it belongs to.

use crate::config::HttpConfig;
use crate::fetch::parser::title_or_default;
use crate::output::Finding;
use crate::SearchMasterError;
use reqwest::{header::CONTENT_TYPE, Client};
use std::fmt;
use std::time::Duration;

/// Media-type token a response must declare to be treated as a page
const HTML_MEDIA_TYPE: &str = "text/html";

/// An HTML page that was fetched successfully
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL and title of the page
    pub finding: Finding,

    /// Raw response body
    pub body: String,
}

/// Reason a fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    HttpStatus(u16),

    /// DNS, connection, timeout or body read failure
    Request(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::HttpStatus(status) => write!(f, "HTTP status {}", status),
            FetchError::Request(message) => write!(f, "{}", message),
        }
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// The URL resolved to an HTML page
    Page(FetchedPage),

    /// The response was not HTML (deliberate skip, not an error)
    Skipped {
        /// The Content-Type received, empty when absent
        content_type: String,
    },

    /// The request failed
    Failed(FetchError),
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent)
/// * `timeout` - Whole-request timeout applied to every call
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a candidate URL and classifies the response
///
/// # Request Flow
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Transport error (DNS, connect, timeout) | `Failed(Request)` |
/// | Non-2xx status | `Failed(HttpStatus)` |
/// | Content-Type without `text/html` | `Skipped` |
/// | Body read error | `Failed(Request)` |
/// | HTML | `Page` with title or "No Title" |
///
/// Every outcome other than `Page` is logged with the URL.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = classify_request_error(&e);
            tracing::warn!("Request error fetching {}: {}", url, error);
            return FetchOutcome::Failed(error);
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP error fetching {}: status {}", url, status.as_u16());
        return FetchOutcome::Failed(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains(HTML_MEDIA_TYPE) {
        tracing::warn!("Skipped non-HTML content: {} ({})", url, content_type);
        return FetchOutcome::Skipped { content_type };
    }

    match response.text().await {
        Ok(body) => {
            let title = title_or_default(&body);
            tracing::debug!("Fetched {} ({})", url, title);
            FetchOutcome::Page(FetchedPage {
                finding: Finding::new(url, title),
                body,
            })
        }
        Err(e) => {
            let error = classify_request_error(&e);
            tracing::warn!("Error reading body of {}: {}", url, error);
            FetchOutcome::Failed(error)
        }
    }
}

/// Fetches the raw body of a URL regardless of its content type
///
/// Used by the content matcher when page bodies are not reused.
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(SearchMasterError::HttpStatus)` - Non-2xx status
/// * `Err(SearchMasterError::Transport)` - Request or body read failed
pub async fn fetch_body(client: &Client, url: &str) -> crate::Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SearchMasterError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchMasterError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| SearchMasterError::Transport {
            url: url.to_string(),
            source,
        })
}

fn classify_request_error(error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Request("Request timeout".to_string())
    } else if error.is_connect() {
        FetchError::Request(format!("Connection failed: {}", error))
    } else {
        FetchError::Request(error.to_string())
    }
}
