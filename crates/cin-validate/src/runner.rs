//! Single-rule execution.

use tracing::{debug, debug_span};

use crate::context::RuleContext;
use crate::error::Result;
use crate::rule::Rule;
use crate::tables::TableSet;

/// Run `rule` against `tables` with a fresh context and return the context.
///
/// An error raised by the rule body is returned unchanged.
pub fn run_rule(rule: &dyn Rule, tables: &TableSet) -> Result<RuleContext> {
    let definition = rule.definition();
    let span = debug_span!("rule", code = %definition.code, table = %definition.table);
    let _enter = span.enter();

    let mut ctx = RuleContext::new(definition.clone());
    rule.validate(tables, &mut ctx)?;
    debug!(findings = ctx.finding_count(), "rule finished");
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::RuleDefinition;
    use crate::error::ValidateError;
    use crate::rule::FnRule;
    use cin_model::{Header, TableId};
    use polars::prelude::*;

    fn flag_first_row(_tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
        ctx.push_issue(TableId::Header, Header::YEAR, [0]);
        Ok(())
    }

    fn needs_section47(tables: &TableSet, _ctx: &mut RuleContext) -> Result<()> {
        tables.get(TableId::Section47)?;
        Ok(())
    }

    #[test]
    fn context_carries_definition_and_issues() {
        let rule = FnRule::new(
            RuleDefinition::new("9999", TableId::Header, "test rule"),
            flag_first_row,
        );
        let ctx = run_rule(&rule, &TableSet::new()).unwrap();
        assert_eq!(ctx.definition().code.as_str(), "9999");
        assert_eq!(ctx.issues().count(), 1);
    }

    #[test]
    fn each_run_starts_from_a_clean_context() {
        let rule = FnRule::new(
            RuleDefinition::new("9999", TableId::Header, "test rule"),
            flag_first_row,
        );
        let tables = TableSet::new();
        let first = run_rule(&rule, &tables).unwrap();
        let second = run_rule(&rule, &tables).unwrap();
        assert_eq!(first.all_issues(), second.all_issues());
        assert_eq!(second.issues().count(), 1);
    }

    #[test]
    fn rule_errors_propagate() {
        let rule = FnRule::new(
            RuleDefinition::new("9998", TableId::Section47, "needs s47"),
            needs_section47,
        );
        let tables = TableSet::new().with_table(
            TableId::Header,
            df! { "Year" => &["2022"] }.unwrap(),
        );
        let err = run_rule(&rule, &tables).unwrap_err();
        assert!(matches!(
            err,
            ValidateError::MissingTable {
                table: TableId::Section47
            }
        ));
    }
}
