//! Rule engine for CIN census submissions.
//!
//! A rule pairs a [`RuleDefinition`] with a validation body. Running a rule
//! against a [`TableSet`] yields a [`RuleContext`] holding the issues the body
//! pushed: single cells, groups of rows keyed by an [`ErrorId`], or a verdict
//! about the whole return.
//!
//! # Example
//!
//! ```ignore
//! let registry = RuleRegistry::standard()?;
//! let report = registry.run(&tables, &ValidationOptions::default());
//! for summary in report.summaries() {
//!     println!("{} {}", summary.code, summary.issue_count);
//! }
//! ```

pub mod column_reader;
pub mod context;
pub mod definition;
pub mod error;
pub mod issue;
pub mod overlap;
pub mod period;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;
pub mod runner;
pub mod tables;

pub use column_reader::ColumnReader;
pub use context::RuleContext;
pub use definition::RuleDefinition;
pub use error::{Result, ValidateError};
pub use issue::{
    CellIssue, ERROR_ID, ErrorId, GroupedIssue, GroupedKind, Issue, LaIssue, ROW_ID, RowGroup,
    RowGroups,
};
pub use period::{header_census_period, header_reference_date};
pub use registry::{RuleRegistry, ValidationOptions};
pub use report::{IssueRecord, RuleOutcome, RuleSummary, ValidationReport};
pub use rule::{FnRule, Rule, ValidateFn};
pub use runner::run_rule;
pub use tables::TableSet;
