//! Linktrace: shortest link-path finder for content websites
//!
//! This crate discovers the shortest chain of in-site hyperlinks connecting a
//! start page to a target page, revealing the link graph incrementally by
//! fetching and parsing pages. Once a path is found, each hop is explained by
//! extracting the sentence on the source page that contains the link to the
//! next page.

pub mod config;
pub mod explain;
pub mod output;
pub mod search;
pub mod url;

use crate::search::FetchError;
use crate::url::PageId;
use thiserror::Error;

/// Main error type for Linktrace operations
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("start page unreachable: {page}: {source}")]
    StartPageUnreachable { page: PageId, source: FetchError },

    #[error(
        "no path exists within the reachable component \
         (visited {visited} pages, frontier exhausted at depth {depth})"
    )]
    NoPathFound { depth: usize, visited: usize },

    #[error("depth limit {limit} reached without finding the target (visited {visited} pages)")]
    DepthLimit { limit: usize, visited: usize },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Malformed link: {0}")]
    Malformed(String),

    #[error("Link points outside the site: {0}")]
    OffSite(String),
}

/// Result type alias for Linktrace operations
pub type Result<T> = std::result::Result<T, TraceError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use search::{Orchestrator, SearchOutcome};
pub use url::{normalize, Site};
