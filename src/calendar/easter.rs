//! Easter Sunday lookup table

use crate::error::{DateCriteriaError, Result};
use chrono::NaiveDate;

/// First year covered by the Easter table
pub const EASTER_FIRST_YEAR: i32 = 1900;
/// Last year covered by the Easter table
pub const EASTER_LAST_YEAR: i32 = 2099;

/// Gregorian Easter Sunday as (month, day), indexed by `year - EASTER_FIRST_YEAR`
#[rustfmt::skip]
const EASTER_SUNDAYS: [(u32, u32); (EASTER_LAST_YEAR - EASTER_FIRST_YEAR + 1) as usize] = [
    // 1900s
    (4, 15), (4, 7), (3, 30), (4, 12), (4, 3), (4, 23), (4, 15), (3, 31), (4, 19), (4, 11),
    // 1910s
    (3, 27), (4, 16), (4, 7), (3, 23), (4, 12), (4, 4), (4, 23), (4, 8), (3, 31), (4, 20),
    // 1920s
    (4, 4), (3, 27), (4, 16), (4, 1), (4, 20), (4, 12), (4, 4), (4, 17), (4, 8), (3, 31),
    // 1930s
    (4, 20), (4, 5), (3, 27), (4, 16), (4, 1), (4, 21), (4, 12), (3, 28), (4, 17), (4, 9),
    // 1940s
    (3, 24), (4, 13), (4, 5), (4, 25), (4, 9), (4, 1), (4, 21), (4, 6), (3, 28), (4, 17),
    // 1950s
    (4, 9), (3, 25), (4, 13), (4, 5), (4, 18), (4, 10), (4, 1), (4, 21), (4, 6), (3, 29),
    // 1960s
    (4, 17), (4, 2), (4, 22), (4, 14), (3, 29), (4, 18), (4, 10), (3, 26), (4, 14), (4, 6),
    // 1970s
    (3, 29), (4, 11), (4, 2), (4, 22), (4, 14), (3, 30), (4, 18), (4, 10), (3, 26), (4, 15),
    // 1980s
    (4, 6), (4, 19), (4, 11), (4, 3), (4, 22), (4, 7), (3, 30), (4, 19), (4, 3), (3, 26),
    // 1990s
    (4, 15), (3, 31), (4, 19), (4, 11), (4, 3), (4, 16), (4, 7), (3, 30), (4, 12), (4, 4),
    // 2000s
    (4, 23), (4, 15), (3, 31), (4, 20), (4, 11), (3, 27), (4, 16), (4, 8), (3, 23), (4, 12),
    // 2010s
    (4, 4), (4, 24), (4, 8), (3, 31), (4, 20), (4, 5), (3, 27), (4, 16), (4, 1), (4, 21),
    // 2020s
    (4, 12), (4, 4), (4, 17), (4, 9), (3, 31), (4, 20), (4, 5), (3, 28), (4, 16), (4, 1),
    // 2030s
    (4, 21), (4, 13), (3, 28), (4, 17), (4, 9), (3, 25), (4, 13), (4, 5), (4, 25), (4, 10),
    // 2040s
    (4, 1), (4, 21), (4, 6), (3, 29), (4, 17), (4, 9), (3, 25), (4, 14), (4, 5), (4, 18),
    // 2050s
    (4, 10), (4, 2), (4, 21), (4, 6), (3, 29), (4, 18), (4, 2), (4, 22), (4, 14), (3, 30),
    // 2060s
    (4, 18), (4, 10), (3, 26), (4, 15), (4, 6), (3, 29), (4, 11), (4, 3), (4, 22), (4, 14),
    // 2070s
    (3, 30), (4, 19), (4, 10), (3, 26), (4, 15), (4, 7), (4, 19), (4, 11), (4, 3), (4, 23),
    // 2080s
    (4, 7), (3, 30), (4, 19), (4, 4), (3, 26), (4, 15), (3, 31), (4, 20), (4, 11), (4, 3),
    // 2090s
    (4, 16), (4, 8), (3, 30), (4, 12), (4, 4), (4, 24), (4, 15), (3, 31), (4, 20), (4, 12),
];

/// Easter Sunday for the given year
///
/// Fails with [`DateCriteriaError::LookupRange`] outside
/// `EASTER_FIRST_YEAR..=EASTER_LAST_YEAR`.
#[inline]
pub fn easter_sunday(year: i32) -> Result<NaiveDate> {
    if !(EASTER_FIRST_YEAR..=EASTER_LAST_YEAR).contains(&year) {
        return Err(DateCriteriaError::LookupRange { year });
    }

    let (month, day) = EASTER_SUNDAYS[(year - EASTER_FIRST_YEAR) as usize];
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateCriteriaError::LookupRange { year })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    /// Anonymous Gregorian computus, used as ground truth for the table
    fn computus(year: i32) -> (u32, u32) {
        let a = year % 19;
        let b = year / 100;
        let c = year % 100;
        let d = b / 4;
        let e = b % 4;
        let f = (b + 8) / 25;
        let g = (b - f + 1) / 3;
        let h = (19 * a + b - d - g + 15) % 30;
        let i = c / 4;
        let k = c % 4;
        let l = (32 + 2 * e + 2 * i - h - k) % 7;
        let m = (a + 11 * h + 22 * l) / 451;
        let month = (h + l - 7 * m + 114) / 31;
        let day = (h + l - 7 * m + 114) % 31 + 1;
        (month as u32, day as u32)
    }

    #[test]
    fn test_known_easter_sundays() {
        assert_eq!(
            easter_sunday(1900).unwrap(),
            NaiveDate::from_ymd_opt(1900, 4, 15).unwrap()
        );
        assert_eq!(
            easter_sunday(2022).unwrap(),
            NaiveDate::from_ymd_opt(2022, 4, 17).unwrap()
        );
        assert_eq!(
            easter_sunday(2099).unwrap(),
            NaiveDate::from_ymd_opt(2099, 4, 12).unwrap()
        );
    }

    #[test]
    fn test_table_matches_computus() {
        for year in EASTER_FIRST_YEAR..=EASTER_LAST_YEAR {
            let easter = easter_sunday(year).unwrap();
            assert_eq!((easter.month(), easter.day()), computus(year), "year {}", year);
            assert_eq!(easter.weekday(), Weekday::Sun, "year {}", year);
        }
    }

    #[test]
    fn test_out_of_range_years_fail() {
        assert_eq!(
            easter_sunday(1899),
            Err(DateCriteriaError::LookupRange { year: 1899 })
        );
        assert_eq!(
            easter_sunday(3000),
            Err(DateCriteriaError::LookupRange { year: 3000 })
        );
    }
}
