//! 8898Q: query birth dates more than 25 years before the census end.

use chrono::Months;

use cin_model::ChildIdentifiers;

use super::prelude::*;
use crate::period::header_census_period;

const MAX_AGE_YEARS: u32 = 25;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8898Q",
            TableId::ChildIdentifiers,
            "Please check: the child's date of birth is more than 25 years before the census end date",
        )
        .affects([ChildIdentifiers::PERSON_BIRTH_DATE])
        .query(),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let period = header_census_period(tables)?;
    let Some(earliest) = period
        .end
        .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
    else {
        return Ok(());
    };

    let births = tables
        .reader(TableId::ChildIdentifiers)?
        .dates(ChildIdentifiers::PERSON_BIRTH_DATE)?;
    let failing = births
        .iter()
        .enumerate()
        .filter(|(_, birth)| birth.is_some_and(|birth| birth < earliest))
        .map(|(row, _)| row);

    ctx.push_issue(
        TableId::ChildIdentifiers,
        ChildIdentifiers::PERSON_BIRTH_DATE,
        failing,
    );
    Ok(())
}
