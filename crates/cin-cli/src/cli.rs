//! CLI argument definitions for the census validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cin_model::RuleCode;

#[derive(Parser)]
#[command(
    name = "cin-validator",
    version,
    about = "Validate CIN census submissions against the business rules",
    long_about = "Validate a children in need census submission.\n\n\
                  Reads one CSV file per census table from a folder, runs every\n\
                  business rule and reports the rows each rule flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a submission folder.
    Validate(ValidateArgs),

    /// List the registered business rules.
    Rules,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder holding the census tables as `<Table>.csv` files.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Run only these rule codes (repeatable).
    #[arg(long = "only", value_name = "CODE", value_parser = RuleCode::parse)]
    pub only: Vec<RuleCode>,

    /// Skip these rule codes (repeatable).
    #[arg(long = "skip", value_name = "CODE", value_parser = RuleCode::parse)]
    pub skip: Vec<RuleCode>,

    /// Do not run query rules.
    #[arg(long = "no-queries")]
    pub no_queries: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Write the report to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
