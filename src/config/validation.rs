use crate::config::types::{CrawlConfig, HttpConfig, RunArguments};
use crate::ConfigError;

/// Upper bound for concurrent link lookups per page
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Validates the complete run arguments
pub fn validate(arguments: &RunArguments) -> Result<(), ConfigError> {
    validate_scope(arguments)?;
    validate_credentials(arguments);
    validate_http_config(&arguments.http)?;
    validate_crawl_config(&arguments.crawl)?;
    Ok(())
}

/// Validates the scope URL
fn validate_scope(arguments: &RunArguments) -> Result<(), ConfigError> {
    let scope = &arguments.scope;

    if scope.scheme() != "http" && scope.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Scope must use the HTTP or HTTPS scheme, got: {}",
            scope.scheme()
        )));
    }

    if scope.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!("Scope '{}' has no host", scope)));
    }

    Ok(())
}

/// Warns about half-configured credentials
///
/// A username without a password (or the reverse) is not an error; the
/// credentials are simply never sent.
fn validate_credentials(arguments: &RunArguments) {
    match (&arguments.username, &arguments.password) {
        (Some(_), None) => {
            tracing::warn!("Username given without password, HTTP Basic Authentication disabled")
        }
        (None, Some(_)) => {
            tracing::warn!("Password given without username, HTTP Basic Authentication disabled")
        }
        _ => {}
    }
}

/// Validates HTTP client configuration
pub(crate) fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > MAX_CONCURRENT_REQUESTS
    {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be between 1 and {}, got {}",
            MAX_CONCURRENT_REQUESTS, config.max_concurrent_requests
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl limits
pub(crate) fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}
