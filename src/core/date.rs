use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::core::value::TimeOfDay;
use crate::error::CalendarError;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in `month` (1-12). Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Builds a date from its parts, rejecting impossible combinations such as
/// February 30 instead of rolling them into the next month.
pub fn validate_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidDate { year, month, day })
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange(year))
}

pub fn last_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let first = first_of_month(year, month)?;
    Ok(add_days(first, days_in_month(year, month) as i64 - 1))
}

/// Adds (or subtracts) whole days. Saturates at the ends of chrono's range;
/// use [`checked_add_days`] where running off the range must be detected.
pub fn add_days(date: NaiveDate, delta: i64) -> NaiveDate {
    checked_add_days(date, delta).unwrap_or(if delta >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

pub fn checked_add_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let days = Days::new(delta.unsigned_abs());
    if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Shifts by whole months, clamping the day to the target month's length
/// (January 31 + 1 month is February 28/29). `None` past chrono's range.
pub fn add_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let total = date.month0() as i32 + delta;
    let year = date.year().checked_add(total.div_euclid(12))?;
    let month = (total.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// ISO-8601 week number: week 1 is the week holding the year's first Thursday.
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// The year the ISO week of `date` belongs to. Differs from the calendar year
/// for a few days around New Year.
pub fn iso_week_year(date: NaiveDate) -> i32 {
    date.iso_week().year()
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

pub fn weekday_from_index(index: u8) -> Result<Weekday, CalendarError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(CalendarError::InvalidWeekStart(other)),
    }
}

/// Walks back 0-6 days from `date` to the nearest `week_start`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (7 + weekday_index(date.weekday()) - weekday_index(week_start)) % 7;
    add_days(date, -(back as i64))
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(TimeOfDay::START_OF_DAY.to_naive_time())
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(TimeOfDay::END_OF_DAY.to_naive_time())
}

/// Quarter (1-4) holding `date`.
pub fn quarter_of(date: NaiveDate) -> u8 {
    (date.month0() / 3 + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn validate_date_rejects_rollover() {
        assert!(validate_date(2024, 2, 30).is_err());
        assert!(validate_date(2024, 4, 31).is_err());
        assert_eq!(
            validate_date(2024, 13, 1),
            Err(CalendarError::InvalidMonth(13))
        );
        assert_eq!(validate_date(2024, 2, 29), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(ymd(2024, 12, 15), 1), Some(ymd(2025, 1, 15)));
        assert_eq!(add_months(ymd(2024, 1, 15), -1), Some(ymd(2023, 12, 15)));
        assert_eq!(add_months(ymd(2024, 3, 31), -13), Some(ymd(2023, 2, 28)));
    }

    #[test]
    fn shifts_past_chrono_range_fail() {
        assert_eq!(add_months(NaiveDate::MAX, 1), None);
        assert_eq!(add_months(NaiveDate::MIN, -1), None);
        assert_eq!(checked_add_days(NaiveDate::MAX, 1), None);
        assert_eq!(checked_add_days(NaiveDate::MIN, -1), None);
        assert_eq!(checked_add_days(ymd(2024, 2, 28), 1), Some(ymd(2024, 2, 29)));
        // Saturating form stays put at the edge.
        assert_eq!(add_days(NaiveDate::MAX, 3), NaiveDate::MAX);
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(add_days(ymd(2024, 12, 31), 1), ymd(2025, 1, 1));
        assert_eq!(add_days(ymd(2024, 3, 1), -1), ymd(2024, 2, 29));
        assert_eq!(add_days(ymd(2024, 6, 15), 0), ymd(2024, 6, 15));
    }

    #[test]
    fn iso_week_numbers_at_year_edges() {
        assert_eq!(week_number(ymd(2021, 1, 1)), 53);
        assert_eq!(iso_week_year(ymd(2021, 1, 1)), 2020);
        assert_eq!(week_number(ymd(2024, 12, 30)), 1);
        assert_eq!(iso_week_year(ymd(2024, 12, 30)), 2025);
        assert_eq!(week_number(ymd(2024, 7, 1)), 27);
    }

    #[test]
    fn start_of_week_wraps_backwards() {
        // 2024-06-01 is a Saturday.
        assert_eq!(start_of_week(ymd(2024, 6, 1), Weekday::Sun), ymd(2024, 5, 26));
        assert_eq!(start_of_week(ymd(2024, 6, 1), Weekday::Mon), ymd(2024, 5, 27));
        assert_eq!(start_of_week(ymd(2024, 6, 1), Weekday::Sat), ymd(2024, 6, 1));
    }

    #[test]
    fn weekday_index_round_trips() {
        for index in 0..7 {
            let weekday = weekday_from_index(index).expect("weekday");
            assert_eq!(weekday_index(weekday), index);
        }
        assert!(weekday_from_index(7).is_err());
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(quarter_of(ymd(2024, 1, 1)), 1);
        assert_eq!(quarter_of(ymd(2024, 3, 31)), 1);
        assert_eq!(quarter_of(ymd(2024, 4, 1)), 2);
        assert_eq!(quarter_of(ymd(2024, 12, 31)), 4);
    }
}
