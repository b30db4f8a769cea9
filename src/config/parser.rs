use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linktrace::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Start page: {}", config.search.start_reference);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[site]
base-url = "https://ru.wikipedia.org/"
content-selector = "div.mw-body-content p"
namespace-prefixes = ["/wiki/"]

[search]
start-reference = "/wiki/Начало"
final-reference = "/wiki/Конец"
max-concurrent-fetches = 32

[http]
user-agent = "linktrace-test/1.0"
timeout-secs = 15

[output]
log-path = "./logs.txt"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://ru.wikipedia.org/");
        assert_eq!(config.search.start_reference, "/wiki/Начало");
        assert_eq!(config.search.max_concurrent_fetches, 32);
        assert_eq!(config.search.max_depth, 0);
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn test_defaults_applied() {
        let config_content = r#"
[site]
base-url = "https://example.com/"
content-selector = "div.content p"
namespace-prefixes = ["/wiki/"]

[search]
start-reference = "/wiki/A"
final-reference = "/wiki/B"

[output]
log-path = "./logs.txt"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.search.max_concurrent_fetches, 64);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("linktrace/"));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[site]
base-url = "https://example.com/"
content-selector = "div.content p"
namespace-prefixes = []

[search]
start-reference = "/wiki/A"
final-reference = "/wiki/B"

[output]
log-path = "./logs.txt"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
