//! Error types for rule execution.

use cin_model::{ColumnId, RuleCode, TableId};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while building the registry or evaluating a rule body.
///
/// A rule that returns one of these has failed; validation findings are never
/// reported through this type.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The rule needs a table the submission does not contain.
    #[error("table {table} is not present in the submission")]
    MissingTable { table: TableId },

    /// The table is present but lacks a column the rule reads.
    #[error("column {column} not found in table {table}")]
    MissingColumn { table: TableId, column: &'static str },

    /// A column of one table was used to read another.
    #[error("column {} cannot be read from table {table}", column.qualified_name())]
    ColumnTableMismatch { table: TableId, column: ColumnId },

    /// A frame handed over as row groups does not have the
    /// `ERROR_ID`, `ROW_ID` layout.
    #[error("malformed row groups: {reason}")]
    MalformedRowGroups { reason: String },

    /// The Header table does not yield a usable reference date.
    #[error("header reference date is missing or not a date")]
    MissingReferenceDate,

    /// Two rules were registered under one code.
    #[error("rule code {code} is already registered")]
    DuplicateRuleCode { code: RuleCode },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
