//! Crawler module for fetching and checking pages within a scope
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching and client construction
//! - HTML parsing and link extraction
//! - Frontier management
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchResult, RedirectMode};
pub use parser::{extract_hrefs, extract_links};
pub use scheduler::{Frontier, QueuedUrl};

use crate::config::RunArguments;
use crate::output::CrawlReport;
use crate::AwacsError;
use std::sync::Arc;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the checks and the HTTP client
/// 2. Seed the frontier with the scope
/// 3. Fetch and check pages
/// 4. Follow in-scope links
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished; per-page problems are findings
/// * `Err(AwacsError)` - Crawl could not be set up
pub async fn crawl(arguments: RunArguments) -> Result<CrawlReport, AwacsError> {
    run_crawl(Arc::new(arguments)).await
}
