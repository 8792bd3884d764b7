//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the frontier with the scope page
//! - Fetching pages and discovering in-scope links
//! - Running every enabled check against each page
//! - Collecting findings into the crawl report

use crate::checks::{default_checks, Check, Finding, Page};
use crate::config::RunArguments;
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{Frontier, QueuedUrl};
use crate::crawler::{build_http_client, fetch_page, FetchResult, RedirectMode};
use crate::output::{CrawlReport, PageReport};
use crate::url::{is_in_scope, normalize_url};
use crate::AwacsError;
use reqwest::Client;
use std::sync::Arc;

/// Main crawler coordinator structure
pub struct Coordinator {
    arguments: Arc<RunArguments>,
    checks: Vec<Box<dyn Check>>,
    frontier: Frontier,
    client: Client,
}

impl Coordinator {
    /// Creates a coordinator running the default checks
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AwacsError)` - Failed to build a check or the HTTP client
    pub fn new(arguments: Arc<RunArguments>) -> Result<Self, AwacsError> {
        let checks = default_checks(Arc::clone(&arguments))?;
        Self::with_checks(arguments, checks)
    }

    /// Creates a coordinator running the given checks
    pub fn with_checks(
        arguments: Arc<RunArguments>,
        checks: Vec<Box<dyn Check>>,
    ) -> Result<Self, AwacsError> {
        let client = build_http_client(&arguments.http, RedirectMode::Follow)?;

        let mut frontier = Frontier::new(arguments.crawl.clone());
        let seed = normalize_url(arguments.scope.as_str())?;
        frontier.push(seed, 0);

        Ok(Self {
            arguments,
            checks,
            frontier,
            client,
        })
    }

    /// Runs the main crawl loop
    ///
    /// This is the core crawling logic that:
    /// 1. Gets URLs from the frontier
    /// 2. Fetches pages
    /// 3. Runs the checks
    /// 4. Queues in-scope links found on the page
    ///
    /// Failures of individual pages never stop the crawl; they are reported
    /// as findings of that page.
    pub async fn run(&mut self) -> CrawlReport {
        tracing::info!("Starting crawl of {}", self.arguments.scope);

        if self.arguments.fast {
            for check in self.checks.iter().filter(|check| check.is_slow()) {
                tracing::info!("Fast mode: skipping check {}", check.name());
            }
        }

        let mut report = CrawlReport::new(self.arguments.scope.clone());
        let start_time = std::time::Instant::now();

        while let Some(queued) = self.frontier.next_url() {
            tracing::debug!("Processing URL: {}", queued.url);

            if let Some(page_report) = self.process_url(&queued).await {
                report.pages.push(page_report);
            }

            let crawled = self.frontier.dispatched();
            if crawled % 10 == 0 {
                let rate = crawled as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    crawled,
                    self.frontier.frontier_size(),
                    rate
                );
            }
        }

        if self.frontier.limit_reached() {
            tracing::warn!(
                "Page limit of {} reached with {} URLs left in frontier",
                self.arguments.crawl.max_pages,
                self.frontier.frontier_size()
            );
            report.truncated = true;
        }

        report.finish();

        tracing::info!(
            "Crawl completed: {} pages checked in {:?}",
            report.pages.len(),
            start_time.elapsed()
        );

        report
    }

    /// Processes a single URL
    ///
    /// Returns None for URLs that are not checkable pages (non-HTML content,
    /// or a redirect leading out of scope).
    async fn process_url(&mut self, queued: &QueuedUrl) -> Option<PageReport> {
        match fetch_page(&self.client, &queued.url).await {
            FetchResult::Success {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                tracing::debug!(
                    "Fetched {} ({}, {}, {} bytes)",
                    final_url,
                    status_code,
                    content_type,
                    body.len()
                );

                if final_url != queued.url {
                    if !is_in_scope(&self.arguments.scope, &final_url) {
                        tracing::info!("{} redirects out of scope to {}", queued.url, final_url);
                        return None;
                    }
                    self.frontier.mark_seen(&final_url);
                }

                for link in extract_links(&body, &final_url) {
                    if is_in_scope(&self.arguments.scope, &link) {
                        self.frontier.push(link, queued.depth + 1);
                    }
                }

                let page = Page::new(final_url, body);
                let findings = self.run_checks(&page).await;

                Some(PageReport {
                    url: page.url,
                    findings,
                })
            }

            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: not HTML ({})", queued.url, content_type);
                None
            }

            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to fetch {}: HTTP {}", queued.url, status_code);
                let message = format!(
                    "Page could not be fetched: {} (HTTP {})",
                    queued.url, status_code
                );
                Some(fetch_failure(queued, message))
            }

            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", queued.url, error);
                let message = format!("Page could not be fetched: {} ({})", queued.url, error);
                Some(fetch_failure(queued, message))
            }
        }
    }

    /// Runs every enabled check against a page, in check order
    async fn run_checks(&self, page: &Page) -> Vec<Finding> {
        let mut findings = Vec::new();

        for check in &self.checks {
            if self.arguments.fast && check.is_slow() {
                continue;
            }

            let check_findings = check.check(page).await;
            tracing::debug!(
                "Check {} reported {} findings for {}",
                check.name(),
                check_findings.len(),
                page.url
            );
            findings.extend(check_findings);
        }

        findings
    }
}

fn fetch_failure(queued: &QueuedUrl, message: String) -> PageReport {
    PageReport {
        url: queued.url.clone(),
        findings: vec![Finding::error(message)],
    }
}

/// Runs a complete crawl with the default checks
pub async fn run_crawl(arguments: Arc<RunArguments>) -> Result<CrawlReport, AwacsError> {
    let mut coordinator = Coordinator::new(arguments)?;
    Ok(coordinator.run().await)
}
