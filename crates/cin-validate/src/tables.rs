//! The set of census tables a rule runs against.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use cin_model::TableId;

use crate::column_reader::ColumnReader;
use crate::error::{Result, ValidateError};

/// Census tables keyed by identifier.
///
/// Rules only ever see `&TableSet`. A rule that wants to reshape a table
/// clones the frame first (polars frames share their buffers, so this is
/// cheap) and works on its own copy.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: BTreeMap<TableId, DataFrame>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table, returning the previous frame.
    pub fn insert(&mut self, table: TableId, df: DataFrame) -> Option<DataFrame> {
        self.tables.insert(table, df)
    }

    /// Builder form of [`TableSet::insert`].
    #[must_use]
    pub fn with_table(mut self, table: TableId, df: DataFrame) -> Self {
        self.tables.insert(table, df);
        self
    }

    /// The frame for `table`, or [`ValidateError::MissingTable`].
    pub fn get(&self, table: TableId) -> Result<&DataFrame> {
        self.try_get(table)
            .ok_or(ValidateError::MissingTable { table })
    }

    pub fn try_get(&self, table: TableId) -> Option<&DataFrame> {
        self.tables.get(&table)
    }

    /// A column reader over `table`.
    pub fn reader(&self, table: TableId) -> Result<ColumnReader<'_>> {
        self.get(table).map(|df| ColumnReader::new(table, df))
    }

    pub fn contains(&self, table: TableId) -> bool {
        self.tables.contains_key(&table)
    }

    /// Present tables in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = TableId> + '_ {
        self.tables.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Row count per present table.
    pub fn heights(&self) -> BTreeMap<TableId, usize> {
        self.tables
            .iter()
            .map(|(table, df)| (*table, df.height()))
            .collect()
    }
}

impl FromIterator<(TableId, DataFrame)> for TableSet {
    fn from_iter<T: IntoIterator<Item = (TableId, DataFrame)>>(iter: T) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
