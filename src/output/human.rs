//! Human-readable report output
//!
//! Renders findings grouped per page, followed by a one-line summary.
//! In debug mode every checked page is listed and no symbols are used.

use crate::checks::{Finding, FindingKind};
use crate::output::stats::{plural, RunStatistics};
use crate::output::traits::{CrawlReport, Formatter, OutputResult};
use std::io::Write;

/// Formatter for terminal output
#[derive(Debug, Clone, Copy)]
pub struct HumanFormatter {
    errors_only: bool,
    plain: bool,
}

impl HumanFormatter {
    /// Creates the decorated formatter used by default
    pub fn new(errors_only: bool) -> Self {
        Self {
            errors_only,
            plain: false,
        }
    }

    /// Creates the undecorated formatter used in debug mode
    pub fn plain(errors_only: bool) -> Self {
        Self {
            errors_only,
            plain: true,
        }
    }

    fn marker(&self, finding: &Finding) -> &'static str {
        if self.plain {
            return "";
        }
        match finding.kind() {
            FindingKind::Error => "✗ ",
            FindingKind::Warning => "⚠ ",
        }
    }
}

impl Formatter for HumanFormatter {
    fn render(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "Scope: {}", report.scope)?;
        writeln!(out)?;

        for page in &report.pages {
            let findings: Vec<&Finding> = page.visible_findings(self.errors_only).collect();

            if findings.is_empty() {
                if self.plain {
                    writeln!(out, "{} OK", page.url)?;
                }
                continue;
            }

            writeln!(out, "{}", page.url)?;
            for finding in findings {
                writeln!(
                    out,
                    "  {}{:<7} {}",
                    self.marker(finding),
                    finding.kind().as_str(),
                    finding.message()
                )?;
            }
            writeln!(out)?;
        }

        let stats = RunStatistics::from_report(report, self.errors_only);
        let duration = report
            .duration_seconds()
            .map(|secs| format!(" in {:.1}s", secs))
            .unwrap_or_default();

        let verdict = if self.plain || stats.total_findings() > 0 {
            ""
        } else {
            "✓ "
        };

        write!(
            out,
            "{}Checked {}{}: {}, {}",
            verdict,
            plural(stats.pages_checked, "page"),
            duration,
            plural(stats.errors, "error"),
            plural(stats.warnings, "warning"),
        )?;
        if stats.pages_with_findings > 0 {
            write!(out, " on {}", plural(stats.pages_with_findings, "page"))?;
        }
        writeln!(out)?;

        if report.truncated {
            writeln!(out, "Page limit reached, not every page in scope was checked")?;
        }

        Ok(())
    }
}
