//! Issue shapes a rule can report.
//!
//! A rule reports either single cells, groups of rows tied together by an
//! [`ErrorId`], or one verdict about the whole local-authority return.
//! Grouped issues come in three kinds that share a payload and differ only in
//! meaning: single table (Type-1), one push per table of a cross-table
//! violation (Type-2), and a table compared with itself (Type-3).

use std::collections::HashMap;
use std::fmt;

use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;

use cin_common::{any_to_i64, any_to_string};
use cin_model::{ColumnId, RuleCode, TableId};

use crate::error::{Result, ValidateError};

/// Column holding the violation key in a row-group frame.
pub const ERROR_ID: &str = "ERROR_ID";
/// Column holding the original row positions in a row-group frame.
pub const ROW_ID: &str = "ROW_ID";

/// Composite key identifying one violation instance.
///
/// Built from the field values that tell one violation apart from another.
/// Missing values are rendered as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorId(Vec<String>);

impl ErrorId {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// One violation instance and the rows that make it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowGroup {
    pub error_id: ErrorId,
    /// Positions in the original input table, in match order. A row that
    /// matches more than once appears more than once.
    pub row_ids: Vec<usize>,
}

/// Rows grouped by violation.
///
/// Each [`ErrorId`] appears once; pushing a row under a known id appends to
/// that id's group. Groups keep first-appearance order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RowGroups {
    entries: Vec<RowGroup>,
    #[serde(skip)]
    index: HashMap<ErrorId, usize>,
}

impl RowGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row under `error_id`.
    pub fn push(&mut self, error_id: ErrorId, row: usize) {
        self.push_rows(error_id, [row]);
    }

    /// Add several rows under `error_id`, keeping their order.
    pub fn push_rows(&mut self, error_id: ErrorId, rows: impl IntoIterator<Item = usize>) {
        let position = match self.index.get(&error_id) {
            Some(position) => *position,
            None => {
                self.index.insert(error_id.clone(), self.entries.len());
                self.entries.push(RowGroup {
                    error_id,
                    row_ids: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        self.entries[position].row_ids.extend(rows);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RowGroup> {
        self.entries.iter()
    }

    /// Rows recorded under `error_id`.
    pub fn get(&self, error_id: &ErrorId) -> Option<&[usize]> {
        self.index
            .get(error_id)
            .map(|position| self.entries[*position].row_ids.as_slice())
    }

    pub fn error_ids(&self) -> impl Iterator<Item = &ErrorId> {
        self.entries.iter().map(|group| &group.error_id)
    }

    /// Every recorded row position, group by group.
    pub fn row_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .flat_map(|group| group.row_ids.iter().copied())
    }

    /// Total number of row references across all groups.
    pub fn row_count(&self) -> usize {
        self.entries.iter().map(|group| group.row_ids.len()).sum()
    }
}

impl PartialEq for RowGroups {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for RowGroups {}

impl FromIterator<(ErrorId, usize)> for RowGroups {
    fn from_iter<T: IntoIterator<Item = (ErrorId, usize)>>(iter: T) -> Self {
        let mut groups = RowGroups::new();
        for (error_id, row) in iter {
            groups.push(error_id, row);
        }
        groups
    }
}

impl<'a> IntoIterator for &'a RowGroups {
    type Item = &'a RowGroup;
    type IntoIter = std::slice::Iter<'a, RowGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read a frame laid out as `ERROR_ID`, `ROW_ID`.
///
/// `ERROR_ID` may hold a scalar or a list of key values; `ROW_ID` a single
/// position or a list of them. Any other layout, or an `ERROR_ID` repeated
/// across rows, is rejected.
impl TryFrom<&DataFrame> for RowGroups {
    type Error = ValidateError;

    fn try_from(df: &DataFrame) -> Result<Self> {
        let names: Vec<&str> = df
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        if names != [ERROR_ID, ROW_ID] {
            return Err(ValidateError::MalformedRowGroups {
                reason: format!("expected columns [{ERROR_ID}, {ROW_ID}], found {names:?}"),
            });
        }

        let error_ids = df.column(ERROR_ID)?;
        let row_ids = df.column(ROW_ID)?;
        let mut groups = RowGroups::new();
        for idx in 0..df.height() {
            let error_id = error_id_from_value(error_ids.get(idx)?)?;
            if groups.index.contains_key(&error_id) {
                return Err(ValidateError::MalformedRowGroups {
                    reason: format!("{ERROR_ID} {error_id} appears more than once"),
                });
            }
            let rows = row_ids_from_value(row_ids.get(idx)?)?;
            groups.push_rows(error_id, rows);
        }
        Ok(groups)
    }
}

fn error_id_from_value(value: AnyValue<'_>) -> Result<ErrorId> {
    match value {
        AnyValue::Null => Err(ValidateError::MalformedRowGroups {
            reason: format!("null {ERROR_ID}"),
        }),
        AnyValue::List(series) => {
            let mut parts = Vec::with_capacity(series.len());
            for idx in 0..series.len() {
                parts.push(any_to_string(series.get(idx)?));
            }
            Ok(ErrorId(parts))
        }
        other => Ok(ErrorId(vec![any_to_string(other)])),
    }
}

fn row_ids_from_value(value: AnyValue<'_>) -> Result<Vec<usize>> {
    match value {
        AnyValue::List(series) => {
            let mut rows = Vec::with_capacity(series.len());
            for idx in 0..series.len() {
                rows.push(row_position(series.get(idx)?)?);
            }
            Ok(rows)
        }
        other => Ok(vec![row_position(other)?]),
    }
}

fn row_position(value: AnyValue<'_>) -> Result<usize> {
    any_to_i64(value)
        .and_then(|position| usize::try_from(position).ok())
        .ok_or_else(|| ValidateError::MalformedRowGroups {
            reason: format!("{ROW_ID} entries must be non-negative row positions"),
        })
}

/// One offending cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellIssue {
    pub table: TableId,
    pub field: ColumnId,
    /// Position of the row in the input table.
    pub row: usize,
}

/// Which grouped bucket an issue was pushed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupedKind {
    /// Multi-row groups within one table.
    Type1,
    /// One table's share of a cross-table violation.
    Type2,
    /// A table compared against itself.
    Type3,
}

impl GroupedKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Type1 => "type1",
            Self::Type2 => "type2",
            Self::Type3 => "type3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedIssue {
    pub kind: GroupedKind,
    pub table: TableId,
    pub columns: Vec<ColumnId>,
    pub groups: RowGroups,
}

/// A verdict about the whole local-authority return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaIssue {
    pub code: RuleCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Issue {
    Cell(CellIssue),
    Grouped(GroupedIssue),
    LaLevel(LaIssue),
}

impl Issue {
    /// Table the issue points into; `None` for LA-level verdicts.
    pub fn table(&self) -> Option<TableId> {
        match self {
            Issue::Cell(cell) => Some(cell.table),
            Issue::Grouped(grouped) => Some(grouped.table),
            Issue::LaLevel(_) => None,
        }
    }

    /// Number of individual findings the issue represents.
    pub fn finding_count(&self) -> usize {
        match self {
            Issue::Cell(_) | Issue::LaLevel(_) => 1,
            Issue::Grouped(grouped) => grouped.groups.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn id(parts: &[&str]) -> ErrorId {
        ErrorId::new(parts.iter().copied())
    }

    #[test]
    fn push_merges_equal_error_ids_in_first_appearance_order() {
        let mut groups = RowGroups::new();
        groups.push(id(&["child2"]), 4);
        groups.push(id(&["child1"]), 0);
        groups.push(id(&["child2"]), 1);
        groups.push(id(&["child2"]), 1);

        let ids: Vec<_> = groups.error_ids().cloned().collect();
        assert_eq!(ids, vec![id(&["child2"]), id(&["child1"])]);
        assert_eq!(groups.get(&id(&["child2"])), Some(&[4, 1, 1][..]));
        assert_eq!(groups.row_count(), 4);
        assert_eq!(groups.row_ids().collect::<Vec<_>>(), vec![4, 1, 1, 0]);
    }

    #[test]
    fn error_id_display() {
        assert_eq!(id(&["child1", "CIN1"]).to_string(), "(child1, CIN1)");
    }

    #[test]
    fn equality_ignores_lookup_index() {
        let a: RowGroups = [(id(&["a"]), 0), (id(&["b"]), 1)].into_iter().collect();
        let mut b = RowGroups::new();
        b.push_rows(id(&["a"]), [0]);
        b.push_rows(id(&["b"]), [1]);
        assert_eq!(a, b);
    }

    #[test]
    fn frame_with_scalar_columns_converts() {
        let df = df! {
            ERROR_ID => &["child1", "child2"],
            ROW_ID => &[3i64, 0],
        }
        .unwrap();
        let groups = RowGroups::try_from(&df).unwrap();
        assert_eq!(groups.get(&id(&["child1"])), Some(&[3][..]));
        assert_eq!(groups.get(&id(&["child2"])), Some(&[0][..]));
    }

    #[test]
    fn frame_with_wrong_column_order_is_rejected() {
        let df = df! {
            ROW_ID => &[0i64],
            ERROR_ID => &["child1"],
        }
        .unwrap();
        let err = RowGroups::try_from(&df).unwrap_err();
        assert!(matches!(err, ValidateError::MalformedRowGroups { .. }));
    }

    #[test]
    fn frame_with_extra_column_is_rejected() {
        let df = df! {
            ERROR_ID => &["child1"],
            ROW_ID => &[0i64],
            "LAchildID" => &["child1"],
        }
        .unwrap();
        assert!(RowGroups::try_from(&df).is_err());
    }

    #[test]
    fn frame_with_repeated_error_id_is_rejected() {
        let df = df! {
            ERROR_ID => &["child1", "child1"],
            ROW_ID => &[0i64, 1],
        }
        .unwrap();
        assert!(RowGroups::try_from(&df).is_err());
    }

    #[test]
    fn frame_with_negative_row_is_rejected() {
        let df = df! {
            ERROR_ID => &["child1"],
            ROW_ID => &[-1i64],
        }
        .unwrap();
        assert!(RowGroups::try_from(&df).is_err());
    }

    #[test]
    fn grouped_issue_counts_groups() {
        let groups: RowGroups = [(id(&["a"]), 0), (id(&["a"]), 2), (id(&["b"]), 1)]
            .into_iter()
            .collect();
        let issue = Issue::Grouped(GroupedIssue {
            kind: GroupedKind::Type2,
            table: TableId::CINdetails,
            columns: vec![],
            groups,
        });
        assert_eq!(issue.finding_count(), 2);
        assert_eq!(issue.table(), Some(TableId::CINdetails));
    }
}
