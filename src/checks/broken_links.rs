//! Broken link check
//!
//! Reports every hyperlink on a page whose target does not answer with a
//! successful (2xx or 3xx) HTTP status.

use crate::checks::status::{is_broken, StatusResolver};
use crate::checks::{Check, Finding, Page};
use crate::config::RunArguments;
use crate::crawler::{build_http_client, extract_hrefs, RedirectMode};
use crate::url::{is_followable, is_web_url, resolve_href};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Detects hyperlinks that do not resolve to a successful HTTP response
///
/// Link targets are resolved against the crawl scope and looked up through
/// a status cache that lives as long as the check, so a URL linked from many
/// pages is requested only once per run.
#[derive(Debug)]
pub struct BrokenLinkCheck {
    arguments: Arc<RunArguments>,
    resolver: StatusResolver,
}

impl BrokenLinkCheck {
    /// Builds the check around an existing HTTP client
    ///
    /// The client should not follow redirects; see `build_http_client`.
    pub fn with_client(arguments: Arc<RunArguments>, client: Client) -> Self {
        let resolver = StatusResolver::new(client, Arc::clone(&arguments));
        Self {
            arguments,
            resolver,
        }
    }

    pub fn resolver(&self) -> &StatusResolver {
        &self.resolver
    }

    /// Extracts the absolute link targets of a page in document order
    ///
    /// Unfollowable hrefs (`tel:`, `mailto:`, `#...`) are dropped before
    /// resolution. Hrefs that do not resolve, or resolve to something other
    /// than an http(s) URL, are skipped.
    pub fn link_targets(&self, html: &str) -> Vec<Url> {
        extract_hrefs(html)
            .iter()
            .map(|href| href.trim())
            .filter(|href| is_followable(href))
            .filter_map(|href| resolve_href(&self.arguments.scope, href))
            .filter(is_web_url)
            .collect()
    }
}

#[async_trait]
impl Check for BrokenLinkCheck {
    fn new(arguments: Arc<RunArguments>) -> crate::Result<Self> {
        let client = build_http_client(&arguments.http, RedirectMode::None)?;
        Ok(Self::with_client(arguments, client))
    }

    fn name(&self) -> &'static str {
        "broken-links"
    }

    fn is_slow(&self) -> bool {
        true
    }

    async fn check(&self, page: &Page) -> Vec<Finding> {
        let targets = self.link_targets(&page.html);
        tracing::debug!("Checking {} links on {}", targets.len(), page.url);

        let resolver = &self.resolver;

        // `buffered` keeps results in link order
        let statuses: Vec<(Url, u16)> = stream::iter(targets)
            .map(|url| async move {
                let status = resolver.status(&url).await;
                (url, status)
            })
            .buffered(self.arguments.http.max_concurrent_requests.max(1))
            .collect()
            .await;

        statuses
            .into_iter()
            .filter(|(_, status)| is_broken(*status))
            .map(|(url, status)| {
                Finding::warning(format!("Broken link: {} (HTTP {})", url, status))
            })
            .collect()
    }
}
