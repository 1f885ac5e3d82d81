//! 8525: a child needs exactly one of UPN and UPN unknown reason.

use cin_model::ChildIdentifiers;

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8525",
            TableId::ChildIdentifiers,
            "Either UPN or UPN Unknown must be recorded, but not both",
        )
        .affects([ChildIdentifiers::UPN, ChildIdentifiers::UPN_UNKNOWN]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let children = tables.reader(TableId::ChildIdentifiers)?;
    let upns = children.strings(ChildIdentifiers::UPN)?;
    let unknown = children.strings(ChildIdentifiers::UPN_UNKNOWN)?;

    let failing: Vec<usize> = upns
        .iter()
        .zip(&unknown)
        .enumerate()
        .filter(|(_, (upn, reason))| upn.is_some() == reason.is_some())
        .map(|(row, _)| row)
        .collect();

    ctx.push_issue(
        TableId::ChildIdentifiers,
        ChildIdentifiers::UPN,
        failing.iter().copied(),
    );
    ctx.push_issue(
        TableId::ChildIdentifiers,
        ChildIdentifiers::UPN_UNKNOWN,
        failing,
    );
    Ok(())
}
