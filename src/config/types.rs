use crate::query::DEFAULT_DORKS;
use serde::Deserialize;

/// Main configuration structure for SearchMaster
///
/// Every section is optional in the TOML file; missing values fall back to
/// the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_dorks")]
    pub dorks: Vec<String>,
    #[serde(default)]
    pub filters: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            http: HttpConfig::default(),
            dorks: default_dorks(),
            filters: FilterConfig::default(),
        }
    }
}

/// Scan behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of candidate URLs requested per query
    #[serde(rename = "results-per-query", default = "default_results_per_query")]
    pub results_per_query: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Match against the body already downloaded for title extraction
    /// instead of fetching every page a second time
    #[serde(rename = "reuse-page-body", default = "default_true")]
    pub reuse_page_body: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            results_per_query: default_results_per_query(),
            timeout_secs: default_timeout_secs(),
            reuse_page_body: true,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// HTML search endpoint queried by the search provider
    #[serde(rename = "search-endpoint", default = "default_search_endpoint")]
    pub search_endpoint: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            search_endpoint: default_search_endpoint(),
        }
    }
}

/// Post-filter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Substrings that mark a URL as a social-media link
    #[serde(rename = "social-domains", default = "default_social_domains")]
    pub social_domains: Vec<String>,

    /// Extensions that mark a URL as a document link
    #[serde(rename = "file-extensions", default = "default_file_extensions")]
    pub file_extensions: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            social_domains: default_social_domains(),
            file_extensions: default_file_extensions(),
        }
    }
}

fn default_dorks() -> Vec<String> {
    DEFAULT_DORKS.iter().map(|d| d.to_string()).collect()
}

fn default_results_per_query() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("searchmaster/{}", env!("CARGO_PKG_VERSION"))
}

fn default_search_endpoint() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_social_domains() -> Vec<String> {
    ["facebook.com", "twitter.com", "linkedin.com", "instagram.com"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_file_extensions() -> Vec<String> {
    [".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}
