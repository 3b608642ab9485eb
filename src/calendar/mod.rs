//! Calendar helpers backing the date tokens
//!
//! Pure functions over `chrono::NaiveDate`: Easter lookup, month ends and
//! day numbering.

mod easter;

pub use easter::*;

use crate::error::{DateCriteriaError, Result};
use chrono::{Datelike, NaiveDate};

/// Last calendar day of the date's month
pub fn end_of_month(date: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or_else(|| DateCriteriaError::Overflow(format!("no month end after {}", date)))
}

/// Days elapsed since 0001-01-01 (which is day 0)
#[inline]
pub fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - 1
}
