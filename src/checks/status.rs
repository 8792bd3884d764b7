//! HTTP status resolution with a per-run cache
//!
//! Every link target is resolved to its live HTTP status at most once per
//! check instance. Targets are requested with HEAD; redirects are not
//! followed, so a 3xx response counts as a working link.

use crate::config::RunArguments;
use crate::url::same_host;
use reqwest::{Client, RequestBuilder};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use url::Url;

/// Status recorded for a link that produced no HTTP response at all
///
/// Connection failures, DNS failures, timeouts, TLS failures and
/// unparseable responses all map to this value. It lies outside the
/// successful range, so such links are always reported as broken.
pub const UNREACHABLE_STATUS: u16 = 0;

/// Returns true if a status is outside the successful range (200..400)
///
/// # Examples
///
/// ```
/// use awacs::checks::{is_broken, UNREACHABLE_STATUS};
///
/// assert!(!is_broken(200));
/// assert!(!is_broken(301));
/// assert!(is_broken(404));
/// assert!(is_broken(UNREACHABLE_STATUS));
/// ```
pub fn is_broken(status: u16) -> bool {
    !(200..400).contains(&status)
}

/// Mapping from absolute URL to HTTP status code
///
/// Keys are the serialized form of an already resolved `Url`, so a relative
/// href can never become a key. Entries are never evicted.
///
/// Each key owns a `OnceCell`: concurrent lookups of the same URL wait on a
/// single resolution instead of issuing duplicate requests.
#[derive(Debug, Default)]
pub struct StatusCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<u16>>>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached status for a URL, if it has been resolved
    pub async fn get(&self, url: &Url) -> Option<u16> {
        let entries = self.entries.lock().await;
        entries.get(url.as_str()).and_then(|cell| cell.get().copied())
    }

    /// Returns the number of URLs with a resolved status
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns the cached status, running `resolve` only on the first lookup
    pub async fn get_or_resolve<F, Fut>(&self, url: &Url, resolve: F) -> u16
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = u16>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(url.as_str().to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        if let Some(status) = cell.get() {
            tracing::trace!("Status cache hit for {}: {}", url, status);
            return *status;
        }

        *cell.get_or_init(resolve).await
    }
}

/// Resolves link targets to HTTP status codes
///
/// Owns the status cache for one check instance. HTTP Basic credentials
/// from the run arguments are attached only to requests for the scope's own
/// host.
#[derive(Debug)]
pub struct StatusResolver {
    client: Client,
    arguments: Arc<RunArguments>,
    cache: StatusCache,
}

impl StatusResolver {
    pub fn new(client: Client, arguments: Arc<RunArguments>) -> Self {
        Self {
            client,
            arguments,
            cache: StatusCache::new(),
        }
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    /// Returns the HTTP status of an absolute URL
    ///
    /// Never fails: a request that yields no response resolves to
    /// `UNREACHABLE_STATUS`. The outcome is cached either way.
    pub async fn status(&self, url: &Url) -> u16 {
        self.cache.get_or_resolve(url, || self.request_status(url)).await
    }

    /// Returns true if credentials should be sent to this URL
    pub fn should_authenticate(&self, url: &Url) -> bool {
        self.arguments.credentials().is_some() && same_host(&self.arguments.scope, url)
    }

    fn authorize(&self, request: RequestBuilder, url: &Url) -> RequestBuilder {
        if !self.should_authenticate(url) {
            return request;
        }
        match self.arguments.credentials() {
            Some((username, password)) => {
                tracing::trace!("Attaching Basic credentials for {}", url);
                request.basic_auth(username, Some(password))
            }
            None => request,
        }
    }

    async fn request_status(&self, url: &Url) -> u16 {
        tracing::debug!("HEAD {}", url);

        let request = self.authorize(self.client.head(url.clone()), url);

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!("HEAD {} -> {}", url, status);
                status
            }
            Err(e) => {
                // Classify error
                let reason = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    e.to_string()
                };
                tracing::warn!("No response from {}: {}", url, reason);
                UNREACHABLE_STATUS
            }
        }
    }
}
