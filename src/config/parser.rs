use crate::config::types::FileConfig;
use crate::config::validation::{validate_crawl_config, validate_http_config};
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(FileConfig)` - Successfully loaded configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use awacs::config::load_config;
///
/// let config = load_config(Path::new("awacs.toml")).unwrap();
/// println!("Timeout: {}s", config.http.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration file content
///
/// Only the `[http]` and `[crawl]` sections are validated here; the scope
/// and credentials are validated once merged with the command line.
pub fn parse_config(content: &str) -> Result<FileConfig, ConfigError> {
    let config: FileConfig = toml::from_str(content)?;

    validate_http_config(&config.http)?;
    validate_crawl_config(&config.crawl)?;

    Ok(config)
}

/// Parses and checks a scope URL
///
/// The scope must be an absolute HTTP or HTTPS URL with a host.
///
/// # Example
///
/// ```
/// use awacs::config::parse_scope;
///
/// let scope = parse_scope("https://www.example.com/news").unwrap();
/// assert_eq!(scope.host_str(), Some("www.example.com"));
/// assert!(parse_scope("example.com").is_err());
/// ```
pub fn parse_scope(raw: &str) -> Result<Url, ConfigError> {
    let scope = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid scope '{}': {}", raw, e)))?;

    if scope.scheme() != "http" && scope.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Scope '{}' must use the HTTP or HTTPS scheme",
            raw
        )));
    }

    if scope.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Scope '{}' has no host",
            raw
        )));
    }

    Ok(scope)
}
