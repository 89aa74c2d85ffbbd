//! SearchMaster: search-engine reconnaissance
//!
//! This crate runs plain and dork queries against a search provider, fetches
//! every candidate page, keeps the HTML pages whose body contains the search
//! term and reports, filters and persists the findings.

pub mod config;
pub mod fetch;
pub mod filter;
pub mod matcher;
pub mod output;
pub mod query;
pub mod scan;
pub mod search;

use thiserror::Error;

/// Main error type for SearchMaster operations
#[derive(Debug, Error)]
pub enum SearchMasterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Search provider error for query '{query}': {message}")]
    Provider { query: String, message: String },

    #[error("Request error fetching {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP error fetching {url}: status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage error: {0}")]
    Usage(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for SearchMaster operations
pub type Result<T> = std::result::Result<T, SearchMasterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{Finding, FindingSet};
pub use scan::{ScanMode, ScanPlan, Scanner};
pub use search::{DuckDuckGoProvider, SearchProvider};
