//! Aggregated results of a registry run.

use serde::Serialize;

use cin_model::{RuleCode, RuleType, TableId};

use crate::context::RuleContext;
use crate::definition::RuleDefinition;
use crate::error::ValidateError;
use crate::issue::Issue;

/// What happened when one rule ran.
#[derive(Debug)]
pub enum RuleOutcome {
    /// The rule ran to completion; its context holds any findings.
    Completed(RuleContext),
    /// The rule body returned an error.
    Failed {
        definition: RuleDefinition,
        error: ValidateError,
    },
}

impl RuleOutcome {
    pub fn definition(&self) -> &RuleDefinition {
        match self {
            RuleOutcome::Completed(ctx) => ctx.definition(),
            RuleOutcome::Failed { definition, .. } => definition,
        }
    }

    pub fn context(&self) -> Option<&RuleContext> {
        match self {
            RuleOutcome::Completed(ctx) => Some(ctx),
            RuleOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ValidateError> {
        match self {
            RuleOutcome::Completed(_) => None,
            RuleOutcome::Failed { error, .. } => Some(error),
        }
    }

    /// Findings raised; zero for a failed rule.
    pub fn finding_count(&self) -> usize {
        self.context().map_or(0, RuleContext::finding_count)
    }
}

/// One line of the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub code: RuleCode,
    pub table: TableId,
    pub rule_type: RuleType,
    pub message: String,
    pub issue_count: usize,
    /// Error text when the rule failed to run.
    pub failed: Option<String>,
}

/// A single finding flattened for tabular output.
///
/// Cell issues give one record each. Grouped issues give one record per row
/// reference, carrying the group's error id. LA-level issues have no table
/// or row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub code: RuleCode,
    pub rule_type: RuleType,
    pub shape: &'static str,
    pub table: Option<TableId>,
    /// Column names joined with `;`.
    pub columns: String,
    pub row: Option<usize>,
    pub error_id: Option<String>,
    pub message: String,
}

/// Outcomes of every rule a run selected, in registration order.
#[derive(Debug, Default)]
pub struct ValidationReport {
    outcomes: Vec<RuleOutcome>,
}

impl ValidationReport {
    pub fn new(outcomes: Vec<RuleOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Findings raised by error rules.
    pub fn error_count(&self) -> usize {
        self.count_where(RuleType::Error)
    }

    /// Findings raised by query rules.
    pub fn query_count(&self) -> usize {
        self.count_where(RuleType::Query)
    }

    pub fn failed_rules(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RuleOutcome::Failed { .. }))
    }

    /// True when an error rule raised a finding or any rule failed to run.
    pub fn has_blocking_issues(&self) -> bool {
        self.error_count() > 0 || self.failed_rules().next().is_some()
    }

    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.outcomes
            .iter()
            .map(|outcome| {
                let definition = outcome.definition();
                RuleSummary {
                    code: definition.code.clone(),
                    table: definition.table,
                    rule_type: definition.rule_type,
                    message: definition.message.clone(),
                    issue_count: outcome.finding_count(),
                    failed: outcome.error().map(ToString::to_string),
                }
            })
            .collect()
    }

    /// Every finding as a flat record, rule by rule in push order.
    pub fn records(&self) -> Vec<IssueRecord> {
        let mut records = Vec::new();
        for ctx in self.outcomes.iter().filter_map(RuleOutcome::context) {
            let definition = ctx.definition();
            for issue in ctx.all_issues() {
                flatten(definition, issue, &mut records);
            }
        }
        records
    }

    fn count_where(&self, rule_type: RuleType) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.definition().rule_type == rule_type)
            .map(RuleOutcome::finding_count)
            .sum()
    }
}

fn flatten(definition: &RuleDefinition, issue: &Issue, records: &mut Vec<IssueRecord>) {
    let record = |shape, table, columns, row, error_id| IssueRecord {
        code: definition.code.clone(),
        rule_type: definition.rule_type,
        shape,
        table,
        columns,
        row,
        error_id,
        message: definition.message.clone(),
    };
    match issue {
        Issue::Cell(cell) => records.push(record(
            "cell",
            Some(cell.table),
            cell.field.name().to_string(),
            Some(cell.row),
            None,
        )),
        Issue::Grouped(grouped) => {
            let columns = grouped
                .columns
                .iter()
                .map(|column| column.name())
                .collect::<Vec<_>>()
                .join(";");
            for group in &grouped.groups {
                let error_id = group.error_id.to_string();
                for row in &group.row_ids {
                    records.push(record(
                        grouped.kind.label(),
                        Some(grouped.table),
                        columns.clone(),
                        Some(*row),
                        Some(error_id.clone()),
                    ));
                }
            }
        }
        Issue::LaLevel(la) => records.push(IssueRecord {
            code: la.code.clone(),
            rule_type: definition.rule_type,
            shape: "la_level",
            table: None,
            columns: String::new(),
            row: None,
            error_id: None,
            message: la.message.clone(),
        }),
    }
}
