//! Output formatter traits and report types
//!
//! This module defines the trait interface for formatters and the data
//! structures a crawl produces.

use crate::checks::Finding;
use chrono::{DateTime, Utc};
use std::io::Write;
use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Findings collected for one checked page
#[derive(Debug, Clone)]
pub struct PageReport {
    /// The page URL
    pub url: Url,

    /// Findings of every check, in check order
    pub findings: Vec<Finding>,
}

impl PageReport {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            findings: Vec::new(),
        }
    }

    /// Returns the findings that should be shown
    ///
    /// With `errors_only`, warnings are filtered out.
    pub fn visible_findings(&self, errors_only: bool) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| !errors_only || finding.is_error())
    }
}

/// Complete result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The crawl scope
    pub scope: Url,

    pub started_at: DateTime<Utc>,

    pub finished_at: Option<DateTime<Utc>>,

    /// Checked pages in crawl order
    pub pages: Vec<PageReport>,

    /// True if the page limit stopped the crawl early
    pub truncated: bool,
}

impl CrawlReport {
    /// Creates an empty report starting now
    pub fn new(scope: Url) -> Self {
        Self {
            scope,
            started_at: Utc::now(),
            finished_at: None,
            pages: Vec::new(),
            truncated: false,
        }
    }

    /// Marks the report as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the run duration in seconds, if finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Iterates over every visible finding together with its page
    pub fn visible_findings(&self, errors_only: bool) -> impl Iterator<Item = (&Url, &Finding)> {
        self.pages.iter().flat_map(move |page| {
            page.visible_findings(errors_only)
                .map(move |finding| (&page.url, finding))
        })
    }

    /// Returns true if at least one finding remains after filtering
    pub fn has_visible_findings(&self, errors_only: bool) -> bool {
        self.visible_findings(errors_only).next().is_some()
    }
}

/// Trait for report formatters
///
/// A formatter renders a finished crawl report to a writer. Which findings
/// are shown (e.g. errors only) is decided by the formatter, never by the
/// checks.
pub trait Formatter {
    /// Renders the report
    ///
    /// # Arguments
    ///
    /// * `report` - The finished crawl report
    /// * `out` - Destination of the rendered output
    fn render(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()>;
}
