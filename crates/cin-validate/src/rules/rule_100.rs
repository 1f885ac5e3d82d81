//! 100: the Header reference date must be 31 March of the collection year.

use cin_common::{parse_i64, reference_date_for_year};
use cin_model::Header;

use super::prelude::*;

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "100",
            TableId::Header,
            "Reference Date is incorrect",
        )
        .affects([Header::REFERENCE_DATE]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let header = tables.reader(TableId::Header)?;
    let years = header.strings(Header::YEAR)?;
    let reference_dates = header.dates(Header::REFERENCE_DATE)?;

    let failing = years
        .iter()
        .zip(&reference_dates)
        .enumerate()
        .filter(|(_, (year, reference_date))| {
            let expected = year
                .as_deref()
                .and_then(parse_i64)
                .and_then(|year| i32::try_from(year).ok())
                .and_then(reference_date_for_year);
            expected.is_none() || **reference_date != expected
        })
        .map(|(row, _)| row);

    ctx.push_issue(TableId::Header, Header::REFERENCE_DATE, failing);
    Ok(())
}
