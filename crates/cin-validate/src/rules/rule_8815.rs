//! 8815: a child may have at most one open referral.

use cin_model::CINdetails;

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8815",
            TableId::CINdetails,
            "More than one open referral for this child (CIN closure date missing)",
        )
        .affects([CINdetails::LA_CHILD_ID, CINdetails::CIN_CLOSURE_DATE]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let referrals = tables.reader(TableId::CINdetails)?;
    let children = referrals.strings(CINdetails::LA_CHILD_ID)?;
    let closures = referrals.dates(CINdetails::CIN_CLOSURE_DATE)?;

    let open: RowGroups = children
        .iter()
        .zip(&closures)
        .enumerate()
        .filter_map(|(row, (child, closure))| match (child, closure) {
            (Some(child), None) => Some((ErrorId::new([child.as_str()]), row)),
            _ => None,
        })
        .collect();

    let failing: RowGroups = open
        .iter()
        .filter(|group| group.row_ids.len() > 1)
        .flat_map(|group| {
            group
                .row_ids
                .iter()
                .map(|row| (group.error_id.clone(), *row))
        })
        .collect();

    ctx.push_type_1(
        TableId::CINdetails,
        &[CINdetails::LA_CHILD_ID, CINdetails::CIN_CLOSURE_DATE],
        failing,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{frame, id};
    use crate::runner::run_rule;

    #[test]
    fn groups_open_referrals_per_child() {
        let tables = TableSet::new().with_table(
            TableId::CINdetails,
            frame(&[
                (
                    "LAchildID",
                    &[
                        Some("child1"),
                        Some("child2"),
                        Some("child1"),
                        Some("child2"),
                        Some("child3"),
                    ],
                ),
                (
                    "CINclosureDate",
                    &[None, None, None, Some("2021-12-01"), None],
                ),
            ]),
        );
        let ctx = run_rule(&rule(), &tables).unwrap();
        let issue = ctx.type1_issues().expect("type1 issue");
        assert_eq!(issue.table, TableId::CINdetails);
        assert_eq!(issue.groups.len(), 1);
        assert_eq!(issue.groups.get(&id(&["child1"])), Some(&[0, 2][..]));
    }

    #[test]
    fn single_open_referral_is_clean() {
        let tables = TableSet::new().with_table(
            TableId::CINdetails,
            frame(&[
                ("LAchildID", &[Some("child1"), Some("child1")]),
                ("CINclosureDate", &[None, Some("2021-12-01")]),
            ]),
        );
        let ctx = run_rule(&rule(), &tables).unwrap();
        assert!(ctx.type1_issues().is_none());
    }
}
