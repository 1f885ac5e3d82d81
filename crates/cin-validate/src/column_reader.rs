//! Column reader utilities for rule bodies.
//!
//! `ColumnReader` reads whole census columns into plain vectors indexed by
//! row position, so a rule can join and filter tables without losing track of
//! which input row each value came from.
//!
//! # Example
//!
//! ```ignore
//! let reader = tables.reader(TableId::ChildIdentifiers)?;
//!
//! // Rows whose LAchildID is blank
//! let missing = reader.missing_rows(ChildIdentifiers::LA_CHILD_ID)?;
//!
//! // Parsed dates, one per row
//! let births = reader.dates(ChildIdentifiers::PERSON_BIRTH_DATE)?;
//! ```

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataFrame};

use cin_common::{any_to_date, any_to_flag, any_to_string_non_empty};
use cin_model::{ColumnId, TableId};

use crate::error::{Result, ValidateError};

/// A reader bound to one census table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnReader<'a> {
    table: TableId,
    df: &'a DataFrame,
}

impl<'a> ColumnReader<'a> {
    /// Create a reader for `df`, which holds the `table` table.
    #[inline]
    pub fn new(table: TableId, df: &'a DataFrame) -> Self {
        Self { table, df }
    }

    #[inline]
    pub fn table(&self) -> TableId {
        self.table
    }

    /// Get the number of rows in the table.
    #[inline]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: ColumnId) -> bool {
        self.column(column).is_ok()
    }

    /// Resolve `column` against the frame.
    ///
    /// Fails if the column belongs to a different table or is absent. Names
    /// match exactly first, then case-insensitively.
    pub fn column(&self, column: ColumnId) -> Result<&'a Column> {
        if column.table() != self.table {
            return Err(ValidateError::ColumnTableMismatch {
                table: self.table,
                column,
            });
        }
        if let Ok(found) = self.df.column(column.name()) {
            return Ok(found);
        }
        let name = self
            .df
            .get_column_names()
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(column.name()))
            .ok_or(ValidateError::MissingColumn {
                table: self.table,
                column: column.name(),
            })?;
        Ok(self.df.column(name.as_str())?)
    }

    /// Trimmed text per row; blank and null cells are `None`.
    pub fn strings(&self, column: ColumnId) -> Result<Vec<Option<String>>> {
        self.map_values(column, any_to_string_non_empty)
    }

    /// Dates per row; blank, null and unparseable cells are `None`.
    pub fn dates(&self, column: ColumnId) -> Result<Vec<Option<NaiveDate>>> {
        self.map_values(column, any_to_date)
    }

    /// Yes/no flags per row; blank and unrecognised cells are `None`.
    pub fn flags(&self, column: ColumnId) -> Result<Vec<Option<bool>>> {
        self.map_values(column, any_to_flag)
    }

    /// Row positions whose trimmed text satisfies `predicate`.
    ///
    /// The predicate sees `None` for blank cells.
    pub fn rows_where<F>(&self, column: ColumnId, predicate: F) -> Result<Vec<usize>>
    where
        F: Fn(Option<&str>) -> bool,
    {
        Ok(self
            .strings(column)?
            .iter()
            .enumerate()
            .filter(|(_, value)| predicate(value.as_deref()))
            .map(|(idx, _)| idx)
            .collect())
    }

    /// Row positions where `column` is blank or null.
    pub fn missing_rows(&self, column: ColumnId) -> Result<Vec<usize>> {
        self.rows_where(column, |value| value.is_none())
    }

    fn map_values<T, F>(&self, column: ColumnId, convert: F) -> Result<Vec<T>>
    where
        F: Fn(AnyValue<'_>) -> T,
    {
        let series = self.column(column)?;
        let mut values = Vec::with_capacity(self.df.height());
        for idx in 0..self.df.height() {
            values.push(convert(series.get(idx)?));
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cin_model::{CINdetails, ChildIdentifiers};
    use polars::prelude::*;

    fn child_identifiers() -> DataFrame {
        df! {
            "LAchildID" => &[Some("child1"), None, Some("  "), Some("child4")],
            "upn" => &[Some("A123456789012"), None, None, Some("X")],
            "PersonBirthDate" => &[Some("2010-05-01"), Some("01/06/2012"), Some("bad"), None],
        }
        .unwrap()
    }

    #[test]
    fn strings_trim_and_blank_to_none() {
        let df = child_identifiers();
        let reader = ColumnReader::new(TableId::ChildIdentifiers, &df);
        let values = reader.strings(ChildIdentifiers::LA_CHILD_ID).unwrap();
        assert_eq!(
            values,
            vec![Some("child1".to_string()), None, None, Some("child4".to_string())]
        );
        assert_eq!(
            reader.missing_rows(ChildIdentifiers::LA_CHILD_ID).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn column_names_match_case_insensitively() {
        let df = child_identifiers();
        let reader = ColumnReader::new(TableId::ChildIdentifiers, &df);
        let rows = reader
            .rows_where(ChildIdentifiers::UPN, |value| value.is_some())
            .unwrap();
        assert_eq!(rows, vec![0, 3]);
    }

    #[test]
    fn dates_parse_each_layout() {
        let df = child_identifiers();
        let reader = ColumnReader::new(TableId::ChildIdentifiers, &df);
        let dates = reader.dates(ChildIdentifiers::PERSON_BIRTH_DATE).unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2010, 5, 1));
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2012, 6, 1));
        assert_eq!(dates[2], None);
        assert_eq!(dates[3], None);
    }

    #[test]
    fn foreign_column_is_rejected() {
        let df = child_identifiers();
        let reader = ColumnReader::new(TableId::ChildIdentifiers, &df);
        let err = reader.strings(CINdetails::LA_CHILD_ID).unwrap_err();
        assert!(matches!(err, ValidateError::ColumnTableMismatch { .. }));
    }

    #[test]
    fn absent_column_is_reported() {
        let df = child_identifiers();
        let reader = ColumnReader::new(TableId::ChildIdentifiers, &df);
        let err = reader.strings(ChildIdentifiers::GENDER_CURRENT).unwrap_err();
        assert!(matches!(
            err,
            ValidateError::MissingColumn {
                column: "GenderCurrent",
                ..
            }
        ));
        assert!(!reader.has_column(ChildIdentifiers::GENDER_CURRENT));
    }

    #[test]
    fn empty_table_reads_as_empty() {
        let df = df! {
            "LAchildID" => Vec::<String>::new(),
        }
        .unwrap();
        let reader = ColumnReader::new(TableId::ChildIdentifiers, &df);
        assert_eq!(reader.height(), 0);
        assert!(reader.strings(ChildIdentifiers::LA_CHILD_ID).unwrap().is_empty());
    }
}
