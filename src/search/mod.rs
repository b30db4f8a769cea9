//! Search module: page fetching, the frontier, and the BFS orchestrator
//!
//! This module contains the core search logic, including:
//! - HTTP client construction
//! - Page fetching and in-namespace link extraction
//! - Admission control and frontier bookkeeping
//! - Level-synchronized breadth-first expansion

mod fetcher;
mod frontier;
mod orchestrator;

pub use fetcher::{extract_links, fetch_links, fetch_page, FetchError};
pub use frontier::{FrontierEntry, Level, VisitedRegistry};
pub use orchestrator::{Orchestrator, SearchLimits, SearchOutcome};

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used by both the search and the explanation pass
///
/// # Example
///
/// ```no_run
/// use linktrace::config::HttpConfig;
/// use linktrace::search::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()
}
