use crate::config::types::{Config, HttpConfig, SearchConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_search_config(&config.search)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site description
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use HTTP or HTTPS, got '{}'",
            base.scheme()
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url must include a host".to_string(),
        ));
    }

    Selector::parse(&config.content_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!(
            "content-selector '{}' is not a valid CSS selector: {:?}",
            config.content_selector, e
        ))
    })?;

    if config.namespace_prefixes.is_empty() {
        return Err(ConfigError::Validation(
            "namespace-prefixes must list at least one path prefix".to_string(),
        ));
    }

    for prefix in &config.namespace_prefixes {
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "namespace prefix '{}' must start with '/'",
                prefix
            )));
        }
    }

    Ok(())
}

/// Validates search configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.start_reference.trim().is_empty() {
        return Err(ConfigError::Validation(
            "start-reference cannot be empty".to_string(),
        ));
    }

    if config.final_reference.trim().is_empty() {
        return Err(ConfigError::Validation(
            "final-reference cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 1024 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and 1024, got {}",
            config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
