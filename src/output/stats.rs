//! Run statistics derived from a crawl report

use crate::checks::FindingKind;
use crate::output::traits::CrawlReport;

/// Aggregate numbers for a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Pages fetched and checked
    pub pages_checked: usize,

    /// Pages with at least one visible finding
    pub pages_with_findings: usize,

    pub warnings: usize,

    pub errors: usize,
}

impl RunStatistics {
    /// Computes the statistics over the visible findings of a report
    pub fn from_report(report: &CrawlReport, errors_only: bool) -> Self {
        let mut stats = Self {
            pages_checked: report.pages.len(),
            ..Self::default()
        };

        for page in &report.pages {
            let mut any = false;
            for finding in page.visible_findings(errors_only) {
                any = true;
                match finding.kind() {
                    FindingKind::Warning => stats.warnings += 1,
                    FindingKind::Error => stats.errors += 1,
                }
            }
            if any {
                stats.pages_with_findings += 1;
            }
        }

        stats
    }

    /// Total number of visible findings
    pub fn total_findings(&self) -> usize {
        self.warnings + self.errors
    }
}

/// Formats a count with a singular or plural noun
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
