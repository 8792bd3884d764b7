//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the crawler, including:
//! - Building HTTP clients from the run's HTTP configuration
//! - GET requests to fetch page content
//! - Error classification

use crate::config::HttpConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed when fetching pages
const MAX_REDIRECTS: usize = 10;

/// Redirect behaviour of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Report 3xx responses as they are (used for link status lookups)
    None,
    /// Follow up to `MAX_REDIRECTS` hops (used for page fetches)
    Follow,
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration of the run
/// * `redirects` - Whether the client follows redirects
///
/// # Example
///
/// ```no_run
/// use awacs::config::HttpConfig;
/// use awacs::crawler::{build_http_client, RedirectMode};
///
/// let client = build_http_client(&HttpConfig::default(), RedirectMode::None).unwrap();
/// ```
pub fn build_http_client(
    config: &HttpConfig,
    redirects: RedirectMode,
) -> Result<Client, reqwest::Error> {
    let policy = match redirects {
        RedirectMode::None => Policy::none(),
        RedirectMode::Follow => Policy::limited(MAX_REDIRECTS),
    };

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(policy)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page with a GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with `text/html` | Success |
/// | 2xx with another type | ContentMismatch |
/// | Any other status | HttpError |
/// | Timeout, connection or body error | NetworkError |
///
/// A missing Content-Type header is treated as HTML.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    // Check Content-Type
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("text/html") {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
