//! 8620: a Section 47 enquiry cannot start before its referral.

use cin_model::{CINdetails, Section47};

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8620",
            TableId::Section47,
            "S47 Enquiry Start Date must be on or after the CIN Referral Date",
        )
        .affects([
            Section47::S47_ACTUAL_START_DATE,
            CINdetails::CIN_REFERRAL_DATE,
        ]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let referrals = tables.reader(TableId::CINdetails)?;
    let referral_dates = referrals.dates(CINdetails::CIN_REFERRAL_DATE)?;
    let referral_rows: RowGroups = referrals
        .strings(CINdetails::LA_CHILD_ID)?
        .into_iter()
        .zip(referrals.strings(CINdetails::CIN_DETAILS_ID)?)
        .enumerate()
        .filter_map(|(row, keys)| match keys {
            (Some(child), Some(referral)) => Some((ErrorId::new([child, referral]), row)),
            _ => None,
        })
        .collect();

    let enquiries = tables.reader(TableId::Section47)?;
    let children = enquiries.strings(Section47::LA_CHILD_ID)?;
    let referral_ids = enquiries.strings(Section47::CIN_DETAILS_ID)?;
    let starts = enquiries.dates(Section47::S47_ACTUAL_START_DATE)?;

    let mut enquiry_hits = RowGroups::new();
    let mut referral_hits = RowGroups::new();
    for (row, ((child, referral), start)) in children
        .iter()
        .zip(&referral_ids)
        .zip(&starts)
        .enumerate()
    {
        let (Some(child), Some(referral), Some(start)) = (child, referral, start) else {
            continue;
        };
        let Some(candidates) =
            referral_rows.get(&ErrorId::new([child.as_str(), referral.as_str()]))
        else {
            continue;
        };
        let later: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|candidate| referral_dates[*candidate].is_some_and(|date| *start < date))
            .collect();
        if later.is_empty() {
            continue;
        }
        let error_id = ErrorId::new([child.clone(), referral.clone(), start.to_string()]);
        enquiry_hits.push(error_id.clone(), row);
        referral_hits.push_rows(error_id, later);
    }

    ctx.push_type_2(
        TableId::Section47,
        &[
            Section47::LA_CHILD_ID,
            Section47::CIN_DETAILS_ID,
            Section47::S47_ACTUAL_START_DATE,
        ],
        enquiry_hits,
    );
    ctx.push_type_2(
        TableId::CINdetails,
        &[
            CINdetails::LA_CHILD_ID,
            CINdetails::CIN_DETAILS_ID,
            CINdetails::CIN_REFERRAL_DATE,
        ],
        referral_hits,
    );
    Ok(())
}
