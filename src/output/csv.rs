//! CSV report output
//!
//! One row per visible finding: `url,kind,message`. Fields are quoted as
//! described in RFC 4180 when they contain a comma, quote or line break.

use crate::output::traits::{CrawlReport, Formatter, OutputResult};
use std::borrow::Cow;
use std::io::Write;

/// Column header written before any rows
const HEADER: &str = "url,kind,message";

/// Formatter producing comma-separated values
#[derive(Debug, Clone, Copy)]
pub struct CsvFormatter {
    errors_only: bool,
}

impl CsvFormatter {
    pub fn new(errors_only: bool) -> Self {
        Self { errors_only }
    }
}

impl Formatter for CsvFormatter {
    fn render(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "{}", HEADER)?;

        for (url, finding) in report.visible_findings(self.errors_only) {
            writeln!(
                out,
                "{},{},{}",
                escape_field(url.as_str()),
                finding.kind().as_str(),
                escape_field(finding.message())
            )?;
        }

        Ok(())
    }
}

/// Quotes a field if needed, doubling embedded quotes
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
