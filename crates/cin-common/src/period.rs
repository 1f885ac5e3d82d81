//! Census collection periods and working-day arithmetic.
//!
//! A CIN census covers the year running from 1 April to the 31 March
//! reference date. Both boundaries belong to the period.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Inclusive date range of one collection year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CensusPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CensusPeriod {
    /// True when `date` lies within the period, boundaries included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Period ending on `reference_date` and starting one year and a day earlier.
///
/// `2022-03-31` gives `2021-04-01 ..= 2022-03-31`.
pub fn census_period(reference_date: NaiveDate) -> CensusPeriod {
    let start = reference_date
        .checked_sub_months(Months::new(12))
        .and_then(|date| date.checked_add_days(Days::new(1)))
        .unwrap_or(reference_date);
    CensusPeriod {
        start,
        end: reference_date,
    }
}

/// Period for the collection year whose reference date is 31 March `year`.
pub fn census_period_for_year(year: i32) -> Option<CensusPeriod> {
    NaiveDate::from_ymd_opt(year, 3, 31).map(census_period)
}

/// The 31 March reference date of `year`.
pub fn reference_date_for_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 3, 31)
}

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Move `days` working days from `date`, skipping weekends.
///
/// Negative counts walk backwards. A zero count returns `date` unchanged even
/// when it falls on a weekend.
pub fn add_working_days(date: NaiveDate, days: i64) -> NaiveDate {
    let mut current = date;
    let mut remaining = days.unsigned_abs();
    while remaining > 0 {
        let next = if days > 0 {
            current.succ_opt()
        } else {
            current.pred_opt()
        };
        let Some(next) = next else {
            break;
        };
        current = next;
        if is_working_day(current) {
            remaining -= 1;
        }
    }
    current
}

/// Number of working days after `from` up to and including `to`.
///
/// Zero when `to` is not after `from`.
pub fn working_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    from.iter_days()
        .skip(1)
        .take_while(|date| *date <= to)
        .filter(|date| is_working_day(*date))
        .count() as i64
}
