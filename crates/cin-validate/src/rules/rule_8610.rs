//! 8610: a referral that led to further action needs a primary need code.

use cin_model::CINdetails;

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8610",
            TableId::CINdetails,
            "Primary Need code is missing or invalid for a referral which led to further action",
        )
        .affects([CINdetails::PRIMARY_NEED_CODE, CINdetails::REFERRAL_NFA]),
        validate,
    )
}

/// `N0` to `N9`.
fn is_primary_need_code(code: &str) -> bool {
    matches!(code.as_bytes(), [b'N', digit] if digit.is_ascii_digit())
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let referrals = tables.reader(TableId::CINdetails)?;
    let needs = referrals.strings(CINdetails::PRIMARY_NEED_CODE)?;
    let no_further_action = referrals.flags(CINdetails::REFERRAL_NFA)?;

    let failing = needs
        .iter()
        .zip(&no_further_action)
        .enumerate()
        .filter(|(_, (need, nfa))| {
            **nfa == Some(false) && need.as_deref().is_none_or(|need| !is_primary_need_code(need))
        })
        .map(|(row, _)| row);

    ctx.push_issue(TableId::CINdetails, CINdetails::PRIMARY_NEED_CODE, failing);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{cells, frame};
    use crate::runner::run_rule;

    #[test]
    fn need_code_shape() {
        assert!(is_primary_need_code("N0"));
        assert!(is_primary_need_code("N9"));
        assert!(!is_primary_need_code("N10"));
        assert!(!is_primary_need_code("n1"));
        assert!(!is_primary_need_code("X1"));
    }

    #[test]
    fn only_checks_referrals_with_further_action() {
        let tables = TableSet::new().with_table(
            TableId::CINdetails,
            frame(&[
                (
                    "PrimaryNeedCode",
                    &[Some("N4"), None, None, Some("N99"), None],
                ),
                (
                    "ReferralNFA",
                    &[Some("false"), Some("0"), Some("true"), Some("false"), None],
                ),
            ]),
        );
        let ctx = run_rule(&rule(), &tables).unwrap();
        let issues: Vec<_> = ctx.issues().copied().collect();
        assert_eq!(
            issues,
            cells(TableId::CINdetails, CINdetails::PRIMARY_NEED_CODE, &[1, 3])
        );
    }
}
