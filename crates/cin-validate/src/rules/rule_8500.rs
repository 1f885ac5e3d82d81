//! 8500: every child must have an LA child id.

use cin_model::ChildIdentifiers;

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8500",
            TableId::ChildIdentifiers,
            "LA Child ID missing",
        )
        .affects([ChildIdentifiers::LA_CHILD_ID]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let children = tables.reader(TableId::ChildIdentifiers)?;
    let missing = children.missing_rows(ChildIdentifiers::LA_CHILD_ID)?;
    ctx.push_issue(
        TableId::ChildIdentifiers,
        ChildIdentifiers::LA_CHILD_ID,
        missing,
    );
    Ok(())
}
