//! 2886Q: the initial child protection conference is due 15 working days
//! after the Section 47 enquiry starts.

use cin_common::{add_working_days, working_days_between};
use cin_model::Section47;

use super::prelude::*;

const ICPC_WORKING_DAYS: i64 = 15;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "2886Q",
            TableId::Section47,
            "Please check: the Initial CPC target date or conference date is not within 15 working days of the S47 start",
        )
        .affects([
            Section47::S47_ACTUAL_START_DATE,
            Section47::INITIAL_CPC_TARGET,
            Section47::DATE_OF_INITIAL_CPC,
        ])
        .query(),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let enquiries = tables.reader(TableId::Section47)?;
    let starts = enquiries.dates(Section47::S47_ACTUAL_START_DATE)?;
    let targets = enquiries.dates(Section47::INITIAL_CPC_TARGET)?;
    let conferences = enquiries.dates(Section47::DATE_OF_INITIAL_CPC)?;

    let mut wrong_targets = Vec::new();
    let mut late_conferences = Vec::new();
    for (row, ((start, target), conference)) in
        starts.iter().zip(&targets).zip(&conferences).enumerate()
    {
        let Some(start) = *start else {
            continue;
        };
        if target.is_some_and(|target| target != add_working_days(start, ICPC_WORKING_DAYS)) {
            wrong_targets.push(row);
        }
        if conference
            .is_some_and(|held| working_days_between(start, held) > ICPC_WORKING_DAYS)
        {
            late_conferences.push(row);
        }
    }

    ctx.push_issue(TableId::Section47, Section47::INITIAL_CPC_TARGET, wrong_targets);
    ctx.push_issue(
        TableId::Section47,
        Section47::DATE_OF_INITIAL_CPC,
        late_conferences,
    );
    Ok(())
}
