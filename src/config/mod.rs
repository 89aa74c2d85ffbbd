//! Configuration module for SearchMaster
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file the built-in defaults apply.
//!
//! # Example
//!
//! ```no_run
//! use searchmaster::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("searchmaster.toml")).unwrap();
//! println!("Dorks per scan: {}", config.dorks.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FilterConfig, HttpConfig, ScanConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
