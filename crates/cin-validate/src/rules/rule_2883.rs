//! 2883: more protection plans started than initial conferences were held.

use chrono::NaiveDate;
use tracing::debug;

use cin_common::CensusPeriod;
use cin_model::{CINdetails, ChildProtectionPlans, ColumnId, Section47};

use super::prelude::*;
use crate::period::header_census_period;

const CODE: &str = "2883";
const MESSAGE: &str = "There are more child protection plans starting than initial conferences taking place";

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(CODE, TableId::ChildProtectionPlans, MESSAGE)
            .affects([
                ChildProtectionPlans::CPP_START_DATE,
                CINdetails::DATE_OF_INITIAL_CPC,
                Section47::DATE_OF_INITIAL_CPC,
            ])
            .query(),
        validate,
    )
}

fn count_in_period(
    tables: &TableSet,
    table: TableId,
    column: ColumnId,
    period: &CensusPeriod,
) -> Result<usize> {
    let dates: Vec<Option<NaiveDate>> = tables.reader(table)?.dates(column)?;
    Ok(dates
        .into_iter()
        .flatten()
        .filter(|date| period.contains(*date))
        .count())
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let period = header_census_period(tables)?;
    let plans = count_in_period(
        tables,
        TableId::ChildProtectionPlans,
        ChildProtectionPlans::CPP_START_DATE,
        &period,
    )?;
    let referral_conferences = count_in_period(
        tables,
        TableId::CINdetails,
        CINdetails::DATE_OF_INITIAL_CPC,
        &period,
    )?;
    let enquiry_conferences = count_in_period(
        tables,
        TableId::Section47,
        Section47::DATE_OF_INITIAL_CPC,
        &period,
    )?;
    debug!(
        plans,
        referral_conferences, enquiry_conferences, "counted plans and conferences"
    );

    if plans > referral_conferences + enquiry_conferences {
        ctx.push_la_level(CODE, MESSAGE);
    }
    Ok(())
}
