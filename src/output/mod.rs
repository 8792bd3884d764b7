//! Output module for rendering crawl reports
//!
//! This module handles:
//! - Collecting per-page findings into a crawl report
//! - Rendering the report as human-readable text or CSV
//! - Filtering warnings in errors-only mode
//! - Deriving the process exit code

mod csv;
mod human;
pub mod stats;
mod traits;

pub use self::csv::CsvFormatter;
pub use human::HumanFormatter;
pub use stats::RunStatistics;
pub use traits::{CrawlReport, Formatter, OutputError, OutputResult, PageReport};

use crate::config::{OutputFormat, RunArguments};
use std::io::Write;

/// Exit code when no visible finding remains
pub const EXIT_CLEAN: i32 = 0;

/// Exit code when at least one visible finding remains
pub const EXIT_FINDINGS: i32 = 1;

/// Exit code for fatal errors (configuration, client setup)
pub const EXIT_FATAL: i32 = 2;

/// Formatter that writes nothing, used in silent mode
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFormatter;

impl Formatter for SilentFormatter {
    fn render(&self, _report: &CrawlReport, _out: &mut dyn Write) -> OutputResult<()> {
        Ok(())
    }
}

/// Returns the formatter selected by the run arguments
pub fn formatter_for(arguments: &RunArguments) -> Box<dyn Formatter> {
    let errors_only = arguments.errors_only;
    match arguments.output_format() {
        OutputFormat::Human => Box::new(HumanFormatter::new(errors_only)),
        OutputFormat::Debug => Box::new(HumanFormatter::plain(errors_only)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(errors_only)),
        OutputFormat::Silent => Box::new(SilentFormatter),
    }
}

/// Renders a report and flushes the writer
///
/// Formatter failures surface as `AwacsError::Output`, a failed flush as
/// `AwacsError::Io`.
pub fn write_report(
    formatter: &dyn Formatter,
    report: &CrawlReport,
    out: &mut dyn Write,
) -> crate::Result<()> {
    formatter.render(report, out)?;
    out.flush()?;
    Ok(())
}

/// Returns the process exit code for a finished report
pub fn exit_code(report: &CrawlReport, errors_only: bool) -> i32 {
    if report.has_visible_findings(errors_only) {
        EXIT_FINDINGS
    } else {
        EXIT_CLEAN
    }
}
