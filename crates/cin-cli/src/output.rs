//! Machine-readable report output.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use cin_validate::{IssueRecord, RuleSummary, ValidationReport};

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub error_count: usize,
    pub query_count: usize,
    pub blocking: bool,
    pub rules: Vec<RuleSummary>,
    pub issues: Vec<IssueRecord>,
}

impl JsonReport {
    pub fn from_report(report: &ValidationReport) -> Self {
        Self {
            error_count: report.error_count(),
            query_count: report.query_count(),
            blocking: report.has_blocking_issues(),
            rules: report.summaries(),
            issues: report.records(),
        }
    }
}

pub fn write_json<W: Write>(report: &ValidationReport, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &JsonReport::from_report(report))
        .context("serialize JSON report")?;
    writeln!(writer).context("write JSON report")?;
    Ok(())
}

/// One CSV row per flagged row reference.
pub fn write_csv<W: Write>(report: &ValidationReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in report.records() {
        csv_writer
            .serialize(&record)
            .with_context(|| format!("write CSV record for rule {}", record.code))?;
    }
    csv_writer.flush().context("flush CSV report")?;
    Ok(())
}
