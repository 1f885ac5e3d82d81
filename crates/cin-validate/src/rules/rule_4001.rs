//! 4001: a child protection plan and a CIN plan cannot both be open on the
//! same referral.

use cin_model::{CINplanDates, ChildProtectionPlans, ColumnId};

use super::prelude::*;
use crate::column_reader::ColumnReader;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "4001",
            TableId::ChildProtectionPlans,
            "A CIN Plan cannot run concurrently with a Child Protection Plan",
        )
        .affects([
            ChildProtectionPlans::CPP_END_DATE,
            CINplanDates::CIN_PLAN_END_DATE,
        ]),
        validate,
    )
}

/// Rows whose `end` is blank, keyed by `(child, referral)`.
fn open_rows(
    reader: &ColumnReader<'_>,
    child: ColumnId,
    referral: ColumnId,
    end: ColumnId,
) -> Result<RowGroups> {
    let children = reader.strings(child)?;
    let referrals = reader.strings(referral)?;
    let ends = reader.dates(end)?;
    Ok(children
        .iter()
        .zip(&referrals)
        .zip(&ends)
        .enumerate()
        .filter_map(|(row, ((child, referral), end))| match (child, referral, end) {
            (Some(child), Some(referral), None) => {
                Some((ErrorId::new([child.as_str(), referral.as_str()]), row))
            }
            _ => None,
        })
        .collect())
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let protection = open_rows(
        &tables.reader(TableId::ChildProtectionPlans)?,
        ChildProtectionPlans::LA_CHILD_ID,
        ChildProtectionPlans::CIN_DETAILS_ID,
        ChildProtectionPlans::CPP_END_DATE,
    )?;
    let plans = open_rows(
        &tables.reader(TableId::CINplanDates)?,
        CINplanDates::LA_CHILD_ID,
        CINplanDates::CIN_DETAILS_ID,
        CINplanDates::CIN_PLAN_END_DATE,
    )?;

    let mut protection_hits = RowGroups::new();
    let mut plan_hits = RowGroups::new();
    for group in &protection {
        if let Some(plan_rows) = plans.get(&group.error_id) {
            protection_hits.push_rows(group.error_id.clone(), group.row_ids.iter().copied());
            plan_hits.push_rows(group.error_id.clone(), plan_rows.iter().copied());
        }
    }

    ctx.push_type_2(
        TableId::ChildProtectionPlans,
        &[
            ChildProtectionPlans::LA_CHILD_ID,
            ChildProtectionPlans::CIN_DETAILS_ID,
            ChildProtectionPlans::CPP_END_DATE,
        ],
        protection_hits,
    );
    ctx.push_type_2(
        TableId::CINplanDates,
        &[
            CINplanDates::LA_CHILD_ID,
            CINplanDates::CIN_DETAILS_ID,
            CINplanDates::CIN_PLAN_END_DATE,
        ],
        plan_hits,
    );
    Ok(())
}
