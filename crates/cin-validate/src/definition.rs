//! Rule metadata.

use serde::Serialize;

use cin_model::{ColumnId, RuleCode, RuleType, TableId};

/// Immutable description of one business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDefinition {
    pub code: RuleCode,
    /// The table the rule reports against.
    pub table: TableId,
    pub rule_type: RuleType,
    pub message: String,
    /// Columns the rule inspects. Documentation only.
    pub affected_fields: Vec<ColumnId>,
}

impl RuleDefinition {
    /// Define an error rule with no affected fields.
    pub fn new(code: impl Into<RuleCode>, table: TableId, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            table,
            rule_type: RuleType::Error,
            message: message.into(),
            affected_fields: Vec::new(),
        }
    }

    /// Set the affected fields.
    #[must_use]
    pub fn affects(mut self, fields: impl IntoIterator<Item = ColumnId>) -> Self {
        self.affected_fields = fields.into_iter().collect();
        self
    }

    /// Mark the rule as an advisory query.
    #[must_use]
    pub fn query(mut self) -> Self {
        self.rule_type = RuleType::Query;
        self
    }

    pub fn is_query(&self) -> bool {
        self.rule_type == RuleType::Query
    }
}
