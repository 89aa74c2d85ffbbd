//! Page fetching
//!
//! This module contains the per-candidate network step of a scan:
//! - HTTP client construction with the configured timeout
//! - GET requests classified as page, non-HTML skip, or failure
//! - Title extraction from HTML bodies

mod fetcher;
mod parser;

pub use fetcher::{
    build_http_client, fetch_body, fetch_page, FetchError, FetchOutcome, FetchedPage,
};
pub use parser::{extract_title, title_or_default};
