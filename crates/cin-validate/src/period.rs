//! Collection period taken from the submission Header.

use chrono::NaiveDate;

use cin_common::{CensusPeriod, census_period};
use cin_model::{Header, TableId};

use crate::error::{Result, ValidateError};
use crate::tables::TableSet;

/// The Header `ReferenceDate` of the submission.
///
/// The Header table carries a single row; its first non-blank reference date
/// is used.
pub fn header_reference_date(tables: &TableSet) -> Result<NaiveDate> {
    tables
        .reader(TableId::Header)?
        .dates(Header::REFERENCE_DATE)?
        .into_iter()
        .flatten()
        .next()
        .ok_or(ValidateError::MissingReferenceDate)
}

/// Collection period ending on the Header reference date.
pub fn header_census_period(tables: &TableSet) -> Result<CensusPeriod> {
    header_reference_date(tables).map(census_period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn header(reference_date: Option<&str>) -> TableSet {
        TableSet::new().with_table(
            TableId::Header,
            df! { "ReferenceDate" => &[reference_date] }.unwrap(),
        )
    }

    #[test]
    fn reads_reference_date() {
        let period = header_census_period(&header(Some("31/03/2022"))).unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2021, 4, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2022, 3, 31).unwrap());
    }

    #[test]
    fn blank_reference_date_is_an_error() {
        let err = header_reference_date(&header(None)).unwrap_err();
        assert!(matches!(err, ValidateError::MissingReferenceDate));
    }

    #[test]
    fn missing_header_is_an_error() {
        let err = header_reference_date(&TableSet::new()).unwrap_err();
        assert!(matches!(err, ValidateError::MissingTable { .. }));
    }
}
