//! 4014: a child's CIN plans must not overlap.

use cin_model::CINplanDates;

use super::prelude::*;
use crate::overlap::overlapping_ranges;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "4014",
            TableId::CINplanDates,
            "CIN Plan data contains overlapping dates",
        )
        .affects([
            CINplanDates::CIN_PLAN_START_DATE,
            CINplanDates::CIN_PLAN_END_DATE,
        ]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let plans = tables.reader(TableId::CINplanDates)?;
    let overlaps = overlapping_ranges(
        &plans,
        CINplanDates::LA_CHILD_ID,
        CINplanDates::CIN_PLAN_START_DATE,
        CINplanDates::CIN_PLAN_END_DATE,
    )?;
    ctx.push_type_3(
        TableId::CINplanDates,
        &[
            CINplanDates::LA_CHILD_ID,
            CINplanDates::CIN_PLAN_START_DATE,
            CINplanDates::CIN_PLAN_END_DATE,
        ],
        overlaps,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{frame, id};
    use crate::runner::run_rule;

    #[test]
    fn overlapping_plans_are_grouped_and_others_left_out() {
        let tables = TableSet::new().with_table(
            TableId::CINplanDates,
            frame(&[
                (
                    "LAchildID",
                    &[Some("child1"), Some("child1"), Some("child2"), Some("child1")],
                ),
                (
                    "CINPlanStartDate",
                    &[
                        Some("2021-04-10"),
                        Some("2021-05-01"),
                        Some("2021-05-01"),
                        Some("2021-09-01"),
                    ],
                ),
                (
                    "CINPlanEndDate",
                    &[Some("2021-06-01"), Some("2021-08-01"), None, None],
                ),
            ]),
        );
        let ctx = run_rule(&rule(), &tables).unwrap();
        let issues = ctx.type3_issues();
        assert_eq!(issues.len(), 1);
        let groups = &issues[0].groups;
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups.get(&id(&["child1", "2021-04-10", "2021-05-01"])),
            Some(&[0, 1][..])
        );
        assert!(groups.row_ids().all(|row| row != 2 && row != 3));
    }
}
