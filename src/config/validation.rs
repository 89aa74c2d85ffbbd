use crate::config::types::{Config, FilterConfig, HttpConfig, ScanConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scan_config(&config.scan)?;
    validate_http_config(&config.http)?;
    validate_dorks(&config.dorks)?;
    validate_filter_config(&config.filters)?;
    Ok(())
}

/// Validates scan configuration
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.results_per_query < 1 {
        return Err(ConfigError::Validation(format!(
            "results_per_query must be >= 1, got {}",
            config.results_per_query
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    let endpoint = Url::parse(&config.search_endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search_endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "search_endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    Ok(())
}

/// Validates the dork template list
fn validate_dorks(dorks: &[String]) -> Result<(), ConfigError> {
    if dorks.is_empty() {
        return Err(ConfigError::Validation(
            "at least one dork template is required".to_string(),
        ));
    }

    if let Some(pos) = dorks.iter().position(|d| d.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "dork template #{} is blank",
            pos + 1
        )));
    }

    Ok(())
}

/// Validates filter configuration
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if config.social_domains.iter().any(|d| d.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "social_domains cannot contain blank entries".to_string(),
        ));
    }

    for ext in &config.file_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "file extension must start with '.', got '{}'",
                ext
            )));
        }
    }

    Ok(())
}
