use serde::Deserialize;

/// Main configuration structure for Linktrace
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Target site description
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the site (e.g., "https://ru.wikipedia.org/")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// CSS selector for the main content area whose paragraphs carry
    /// followable links (e.g., "div.mw-body-content p")
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// Path prefixes that mark a link as in-namespace (e.g., ["/wiki/"])
    #[serde(rename = "namespace-prefixes")]
    pub namespace_prefixes: Vec<String>,
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Start page, as a percent-encoded path or absolute URL within the site
    #[serde(rename = "start-reference")]
    pub start_reference: String,

    /// Target page, same format as the start reference
    #[serde(rename = "final-reference")]
    pub final_reference: String,

    /// Maximum number of page fetches in flight at once
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Maximum search depth in hops; 0 means unbounded
    #[serde(rename = "max-depth", default)]
    pub max_depth: u32,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the run log listing every admitted page
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_concurrency() -> u32 {
    64
}

fn default_user_agent() -> String {
    format!("linktrace/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}
