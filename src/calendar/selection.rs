use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::core::date::{
    add_days, first_of_month, iso_week_year, last_of_month, quarter_of, start_of_week,
    week_number,
};
use crate::core::value::{
    DateTimeValue, MultipleValue, QuarterValue, RangeValue, TimeOfDay, WeekValue,
};

/// Where the two-click range protocol currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePhase {
    AwaitingStart,
    AwaitingEnd,
}

fn boundary(date: NaiveDate, time: TimeOfDay, with_time: bool) -> DateTimeValue {
    if with_time {
        DateTimeValue::with_time(date, time)
    } else {
        DateTimeValue::date(date)
    }
}

impl RangeValue {
    pub fn new(start: Option<DateTimeValue>, end: Option<DateTimeValue>) -> Self {
        Self { start, end }
    }

    /// Empty and completed ranges both wait for a new start; a half-filled
    /// range waits for its end.
    pub fn phase(&self) -> RangePhase {
        match (self.start, self.end) {
            (Some(_), None) | (None, Some(_)) => RangePhase::AwaitingEnd,
            _ => RangePhase::AwaitingStart,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Inclusive date-only containment. False unless both endpoints are set.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start.date <= date && date <= end.date,
            _ => false,
        }
    }

    /// Applies one click of the two-click range protocol.
    ///
    /// With `with_time` set, the start endpoint gets 00:00:00 and the end
    /// endpoint 23:59:59. Clicking the anchor day again yields a single-day
    /// range; clicking before it swaps the endpoints.
    pub fn click(&mut self, date: NaiveDate, with_time: bool) {
        let anchor = match (self.phase(), self.start.or(self.end)) {
            (RangePhase::AwaitingEnd, Some(anchor)) => anchor.date,
            _ => {
                self.start = Some(boundary(date, TimeOfDay::START_OF_DAY, with_time));
                self.end = None;
                debug!(%date, "range start selected, awaiting end");
                return;
            }
        };

        let (start, end) = if date < anchor {
            (date, anchor)
        } else {
            (anchor, date)
        };
        self.start = Some(boundary(start, TimeOfDay::START_OF_DAY, with_time));
        self.end = Some(boundary(end, TimeOfDay::END_OF_DAY, with_time));
        debug!(%start, %end, "range completed");
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }
}

impl MultipleValue {
    /// Adds `date` if absent, removes it otherwise. Returns whether the date
    /// is selected afterwards.
    pub fn toggle(&mut self, value: DateTimeValue) -> bool {
        match self.0.binary_search_by(|item| item.date.cmp(&value.date)) {
            Ok(idx) => {
                self.0.remove(idx);
                false
            }
            Err(idx) => {
                self.0.insert(idx, value);
                true
            }
        }
    }
}

impl WeekValue {
    /// The week row holding `date` for a calendar starting on `week_start`.
    /// Number and year come from the row's Thursday, the ISO anchor day.
    pub fn containing(date: NaiveDate, week_start: Weekday) -> Self {
        let start_date = start_of_week(date, week_start);
        let end_date = add_days(start_date, 6);
        let anchor = row_anchor(start_date);
        Self {
            week_number: week_number(anchor),
            year: iso_week_year(anchor),
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// The Thursday inside the seven days starting at `start`.
pub(crate) fn row_anchor(start: NaiveDate) -> NaiveDate {
    let offset = (7 + Weekday::Thu.num_days_from_sunday() - start.weekday().num_days_from_sunday()) % 7;
    add_days(start, offset as i64)
}

impl QuarterValue {
    pub fn containing(date: NaiveDate) -> Self {
        let quarter = quarter_of(date);
        let first_month = (quarter as u32 - 1) * 3 + 1;
        let year = date.year();
        // Months derived from a valid date are always in range.
        let start_date = first_of_month(year, first_month).unwrap_or(date);
        let end_date = last_of_month(year, first_month + 2).unwrap_or(date);
        Self {
            quarter,
            year,
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn first_click_starts_new_range() {
        let mut range = RangeValue::default();
        assert_eq!(range.phase(), RangePhase::AwaitingStart);
        range.click(ymd(2024, 6, 10), false);
        assert_eq!(range.start, Some(DateTimeValue::date(ymd(2024, 6, 10))));
        assert_eq!(range.end, None);
        assert_eq!(range.phase(), RangePhase::AwaitingEnd);
    }

    #[test]
    fn second_click_completes_range() {
        let mut range = RangeValue::default();
        range.click(ymd(2024, 6, 10), true);
        range.click(ymd(2024, 6, 20), true);
        assert_eq!(
            range.start,
            Some(DateTimeValue::with_time(ymd(2024, 6, 10), TimeOfDay::START_OF_DAY))
        );
        assert_eq!(
            range.end,
            Some(DateTimeValue::with_time(ymd(2024, 6, 20), TimeOfDay::END_OF_DAY))
        );
        assert_eq!(range.phase(), RangePhase::AwaitingStart);
    }

    #[test]
    fn clicking_before_start_swaps() {
        let mut range = RangeValue::default();
        range.click(ymd(2024, 6, 20), true);
        range.click(ymd(2024, 6, 10), true);
        assert_eq!(range.start.map(|v| v.date), Some(ymd(2024, 6, 10)));
        assert_eq!(range.end.map(|v| v.date), Some(ymd(2024, 6, 20)));
        assert_eq!(range.start.and_then(|v| v.time), Some(TimeOfDay::START_OF_DAY));
        assert_eq!(range.end.and_then(|v| v.time), Some(TimeOfDay::END_OF_DAY));
    }

    #[test]
    fn clicking_same_day_twice_gives_single_day_range() {
        let mut range = RangeValue::default();
        range.click(ymd(2024, 6, 15), true);
        range.click(ymd(2024, 6, 15), true);
        assert_eq!(
            range.start,
            Some(DateTimeValue::with_time(ymd(2024, 6, 15), TimeOfDay::START_OF_DAY))
        );
        assert_eq!(
            range.end,
            Some(DateTimeValue::with_time(ymd(2024, 6, 15), TimeOfDay::END_OF_DAY))
        );
    }

    #[test]
    fn clicking_completed_range_restarts() {
        let mut range = RangeValue::default();
        range.click(ymd(2024, 6, 10), false);
        range.click(ymd(2024, 6, 20), false);
        range.click(ymd(2024, 7, 1), false);
        assert_eq!(range.start.map(|v| v.date), Some(ymd(2024, 7, 1)));
        assert_eq!(range.end, None);
    }

    #[test]
    fn lone_end_acts_as_anchor() {
        let mut range = RangeValue::new(None, Some(DateTimeValue::date(ymd(2024, 6, 20))));
        assert_eq!(range.phase(), RangePhase::AwaitingEnd);
        range.click(ymd(2024, 6, 5), false);
        assert_eq!(range.start.map(|v| v.date), Some(ymd(2024, 6, 5)));
        assert_eq!(range.end.map(|v| v.date), Some(ymd(2024, 6, 20)));
    }

    #[test]
    fn toggle_keeps_multiple_sorted() {
        let mut values = MultipleValue::default();
        assert!(values.toggle(DateTimeValue::date(ymd(2024, 6, 20))));
        assert!(values.toggle(DateTimeValue::date(ymd(2024, 6, 5))));
        assert!(values.toggle(DateTimeValue::date(ymd(2024, 6, 12))));
        assert!(!values.toggle(DateTimeValue::date(ymd(2024, 6, 5))));
        let dates: Vec<NaiveDate> = values.as_slice().iter().map(|v| v.date).collect();
        assert_eq!(dates, vec![ymd(2024, 6, 12), ymd(2024, 6, 20)]);
    }

    #[test]
    fn week_containing_uses_row_thursday() {
        let week = WeekValue::containing(ymd(2024, 7, 3), Weekday::Mon);
        assert_eq!(week.start_date, ymd(2024, 7, 1));
        assert_eq!(week.end_date, ymd(2024, 7, 7));
        assert_eq!(week.week_number, 27);
        assert_eq!(week.year, 2024);

        // Sunday-start row Dec 29 2024 .. Jan 4 2025 is ISO week 1 of 2025.
        let week = WeekValue::containing(ymd(2024, 12, 31), Weekday::Sun);
        assert_eq!(week.start_date, ymd(2024, 12, 29));
        assert_eq!(week.week_number, 1);
        assert_eq!(week.year, 2025);
    }

    #[test]
    fn quarter_containing_spans_three_months() {
        let quarter = QuarterValue::containing(ymd(2024, 5, 17));
        assert_eq!(quarter.quarter, 2);
        assert_eq!(quarter.year, 2024);
        assert_eq!(quarter.start_date, ymd(2024, 4, 1));
        assert_eq!(quarter.end_date, ymd(2024, 6, 30));
        assert!(quarter.contains(ymd(2024, 6, 30)));
        assert!(!quarter.contains(ymd(2024, 7, 1)));
    }
}
