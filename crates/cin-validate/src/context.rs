//! The issue collector handed to every rule invocation.

use std::collections::HashSet;

use tracing::debug;

use cin_model::{ColumnId, RuleCode, TableId};

use crate::definition::RuleDefinition;
use crate::issue::{CellIssue, ErrorId, GroupedIssue, GroupedKind, Issue, LaIssue, RowGroups};

/// Collects the issues one rule raises during one invocation.
///
/// A fresh context is created per invocation; once the runner hands it back it
/// is only read. Issues are kept in push order.
#[derive(Debug, Clone)]
pub struct RuleContext {
    definition: RuleDefinition,
    issues: Vec<Issue>,
}

impl RuleContext {
    pub fn new(definition: RuleDefinition) -> Self {
        Self {
            definition,
            issues: Vec::new(),
        }
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    /// Flag `field` on every row in `rows`.
    pub fn push_issue(
        &mut self,
        table: TableId,
        field: ColumnId,
        rows: impl IntoIterator<Item = usize>,
    ) {
        note_foreign_columns(table, std::slice::from_ref(&field));
        self.issues.extend(
            rows.into_iter()
                .map(|row| Issue::Cell(CellIssue { table, field, row })),
        );
    }

    /// Record the rule's single-table row groups.
    ///
    /// Only one Type-1 record is kept: a second call replaces the first, and
    /// an empty second call leaves none.
    /// Rules spanning several tables use [`RuleContext::push_type_2`].
    pub fn push_type_1(&mut self, table: TableId, columns: &[ColumnId], groups: RowGroups) {
        self.issues.retain(|issue| {
            !matches!(issue, Issue::Grouped(grouped) if grouped.kind == GroupedKind::Type1)
        });
        self.push_grouped(GroupedKind::Type1, table, columns, groups);
    }

    /// Record one table's share of a cross-table violation.
    ///
    /// Call once per participating table with aligned error ids.
    pub fn push_type_2(&mut self, table: TableId, columns: &[ColumnId], groups: RowGroups) {
        self.push_grouped(GroupedKind::Type2, table, columns, groups);
    }

    /// Record rows of a table compared against itself.
    pub fn push_type_3(&mut self, table: TableId, columns: &[ColumnId], groups: RowGroups) {
        self.push_grouped(GroupedKind::Type3, table, columns, groups);
    }

    /// Record a verdict about the whole return. A second call replaces the first.
    pub fn push_la_level(&mut self, code: impl Into<RuleCode>, message: impl Into<String>) {
        self.issues
            .retain(|issue| !matches!(issue, Issue::LaLevel(_)));
        self.issues.push(Issue::LaLevel(LaIssue {
            code: code.into(),
            message: message.into(),
        }));
    }

    /// Empty `groups` record nothing.
    fn push_grouped(
        &mut self,
        kind: GroupedKind,
        table: TableId,
        columns: &[ColumnId],
        groups: RowGroups,
    ) {
        if groups.is_empty() {
            return;
        }
        note_foreign_columns(table, columns);
        self.issues.push(Issue::Grouped(GroupedIssue {
            kind,
            table,
            columns: columns.to_vec(),
            groups,
        }));
    }

    /// Cell issues in push order.
    pub fn issues(&self) -> impl Iterator<Item = &CellIssue> {
        self.issues.iter().filter_map(|issue| match issue {
            Issue::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    pub fn type1_issues(&self) -> Option<&GroupedIssue> {
        self.grouped(GroupedKind::Type1).next()
    }

    pub fn type2_issues(&self) -> Vec<&GroupedIssue> {
        self.grouped(GroupedKind::Type2).collect()
    }

    pub fn type3_issues(&self) -> Vec<&GroupedIssue> {
        self.grouped(GroupedKind::Type3).collect()
    }

    pub fn la_issues(&self) -> Option<&LaIssue> {
        self.issues.iter().find_map(|issue| match issue {
            Issue::LaLevel(la) => Some(la),
            _ => None,
        })
    }

    /// Every issue regardless of shape, in push order.
    pub fn all_issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Total number of findings across all shapes.
    ///
    /// Grouped findings count once per distinct error id within their kind,
    /// so a Type-2 violation spread over several tables counts once.
    pub fn finding_count(&self) -> usize {
        let mut error_ids: HashSet<(GroupedKind, &ErrorId)> = HashSet::new();
        let mut count = 0;
        for issue in &self.issues {
            match issue {
                Issue::Grouped(grouped) => {
                    error_ids.extend(grouped.groups.error_ids().map(|id| (grouped.kind, id)));
                }
                other => count += other.finding_count(),
            }
        }
        count + error_ids.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn grouped(&self, kind: GroupedKind) -> impl Iterator<Item = &GroupedIssue> {
        self.issues.iter().filter_map(move |issue| match issue {
            Issue::Grouped(grouped) if grouped.kind == kind => Some(grouped),
            _ => None,
        })
    }
}

fn note_foreign_columns(table: TableId, columns: &[ColumnId]) {
    for column in columns {
        if column.table() != table {
            debug!(
                table = %table,
                column = %column.qualified_name(),
                "issue column belongs to another table"
            );
        }
    }
}
