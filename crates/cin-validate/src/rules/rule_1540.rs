//! 1540: a recorded UPN must be well formed.
//!
//! A UPN is 13 characters: a letter, eleven digits, then a letter or digit.

use cin_model::ChildIdentifiers;

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "1540",
            TableId::ChildIdentifiers,
            "UPN invalid (wrong length, or invalid characters)",
        )
        .affects([ChildIdentifiers::UPN]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let children = tables.reader(TableId::ChildIdentifiers)?;
    let failing = children.rows_where(ChildIdentifiers::UPN, |upn| {
        upn.is_some_and(|upn| !is_valid_upn(upn))
    })?;
    ctx.push_issue(TableId::ChildIdentifiers, ChildIdentifiers::UPN, failing);
    Ok(())
}

fn is_valid_upn(upn: &str) -> bool {
    let bytes = upn.as_bytes();
    if bytes.len() != 13 {
        return false;
    }
    bytes[0].is_ascii_alphabetic()
        && bytes[1..12].iter().all(u8::is_ascii_digit)
        && bytes[12].is_ascii_alphanumeric()
}
