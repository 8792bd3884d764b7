//! Check framework for page diagnostics
//!
//! A check is a pluggable diagnostic unit evaluated against every page the
//! crawler fetches. This module contains:
//! - The `Check` contract every diagnostic implements
//! - The `Finding` record checks report
//! - The broken link check and its HTTP status cache

mod broken_links;
mod status;

pub use broken_links::BrokenLinkCheck;
pub use status::{is_broken, StatusCache, StatusResolver, UNREACHABLE_STATUS};

use crate::config::RunArguments;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FindingKind {
    Warning,
    Error,
}

impl FindingKind {
    /// Returns the upper-case label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic result produced by a check for a single page
///
/// Findings are created once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    kind: FindingKind,
    message: String,
}

impl Finding {
    pub fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FindingKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FindingKind::Error, message)
    }

    pub fn kind(&self) -> FindingKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.kind == FindingKind::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A fetched page presented to the checks
#[derive(Debug, Clone)]
pub struct Page {
    /// The URL the page was fetched from
    pub url: Url,

    /// Raw HTML content
    pub html: String,
}

impl Page {
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }
}

/// Contract every page diagnostic implements
///
/// A check is constructed once per run from the run arguments and then
/// invoked for every page. It owns whatever state it needs for the whole run
/// (e.g. a status cache) and must be safe to share between tasks.
///
/// `check` never fails: problems with the page or with the network are
/// either reported as findings or skipped, so one bad page or link can never
/// stop the crawl.
#[async_trait]
pub trait Check: Send + Sync {
    /// Builds the check for a run
    ///
    /// Construction performs no network I/O.
    fn new(arguments: Arc<RunArguments>) -> crate::Result<Self>
    where
        Self: Sized;

    /// Stable identifier used in logs
    fn name(&self) -> &'static str;

    /// Returns true for checks that are skipped in fast mode
    fn is_slow(&self) -> bool {
        false
    }

    /// Evaluates a page and returns its findings in a deterministic order
    async fn check(&self, page: &Page) -> Vec<Finding>;
}

/// Builds the checks enabled for a run
///
/// Slow checks are still constructed in fast mode; the coordinator decides
/// which ones to invoke.
pub fn default_checks(arguments: Arc<RunArguments>) -> crate::Result<Vec<Box<dyn Check>>> {
    let checks: Vec<Box<dyn Check>> = vec![Box::new(BrokenLinkCheck::new(arguments)?)];
    Ok(checks)
}
