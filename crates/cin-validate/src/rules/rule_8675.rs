//! 8675: a child's protection plans must not overlap.

use cin_model::ChildProtectionPlans;

use super::prelude::*;
use crate::overlap::overlapping_ranges;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8675",
            TableId::ChildProtectionPlans,
            "Child Protection Plan overlaps with another Child Protection Plan for the same child",
        )
        .affects([
            ChildProtectionPlans::CPP_START_DATE,
            ChildProtectionPlans::CPP_END_DATE,
        ]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let plans = tables.reader(TableId::ChildProtectionPlans)?;
    let overlaps = overlapping_ranges(
        &plans,
        ChildProtectionPlans::LA_CHILD_ID,
        ChildProtectionPlans::CPP_START_DATE,
        ChildProtectionPlans::CPP_END_DATE,
    )?;
    ctx.push_type_3(
        TableId::ChildProtectionPlans,
        &[
            ChildProtectionPlans::LA_CHILD_ID,
            ChildProtectionPlans::CPP_START_DATE,
            ChildProtectionPlans::CPP_END_DATE,
        ],
        overlaps,
    );
    Ok(())
}
