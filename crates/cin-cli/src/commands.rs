use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use tracing::info_span;

use cin_ingest::load_tables;
use cin_validate::{RuleRegistry, ValidationOptions, ValidationReport};

use cin_cli::output::{write_csv, write_json};

use crate::cli::{ReportFormatArg, ValidateArgs};
use crate::summary::{print_summary, rules_table, summary_table};

pub fn run_rules() -> Result<()> {
    let registry = RuleRegistry::standard().context("build rule registry")?;
    println!("{}", rules_table(registry.definitions()));
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let span = info_span!("submission", folder = %args.folder.display());
    let _guard = span.enter();

    let tables = load_tables(&args.folder)
        .with_context(|| format!("load submission from {}", args.folder.display()))?;
    let registry = RuleRegistry::standard().context("build rule registry")?;
    Ok(registry.run(&tables, &validation_options(args)))
}

pub fn validation_options(args: &ValidateArgs) -> ValidationOptions {
    ValidationOptions {
        include_queries: !args.no_queries,
        only: args.only.iter().cloned().collect(),
        skip: args.skip.iter().cloned().collect(),
    }
}

/// Write `report` in the requested format to `--output` or stdout.
pub fn write_report(report: &ValidationReport, args: &ValidateArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create report file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_format(report, args.format, &mut writer)?;
            writer.flush().context("flush report file")
        }
        None => {
            if matches!(args.format, ReportFormatArg::Table) {
                print_summary(report);
                return Ok(());
            }
            let stdout = io::stdout();
            write_format(report, args.format, stdout.lock())
        }
    }
}

fn write_format<W: Write>(
    report: &ValidationReport,
    format: ReportFormatArg,
    mut writer: W,
) -> Result<()> {
    match format {
        ReportFormatArg::Table => {
            writeln!(writer, "{}", summary_table(report)).context("write summary table")
        }
        ReportFormatArg::Json => write_json(report, writer),
        ReportFormatArg::Csv => write_csv(report, writer),
    }
}
