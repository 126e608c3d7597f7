use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::selection::row_anchor;
use crate::core::clock::Clock;
use crate::core::date::{
    add_days, add_months, checked_add_days, first_of_month, iso_week_year, last_of_month,
    start_of_week,
    week_number,
};
use crate::core::value::Selection;
use crate::error::CalendarError;

const DAYS_PER_WEEK: usize = 7;
const MAX_ROWS: usize = 6;
const MIN_ROWS: usize = 4;
/// Furthest day past the first of the month that a six-row grid can reach.
const MAX_SPAN_DAYS: i64 = (MAX_ROWS * DAYS_PER_WEEK) as i64 - 1;

/// Owned form of the caller's "is this day disabled" predicate.
pub type DateFilter = dyn Fn(NaiveDate) -> bool + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_in_range: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_disabled: bool,
    pub is_highlighted: bool,
    pub week_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    /// ISO week of the row's Thursday.
    pub week_number: u32,
    pub week_year: i32,
    pub days: [DayCell; DAYS_PER_WEEK],
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    pub weeks: Vec<WeekRow>,
}

/// Everything the grid builder reads. Borrowed so a render pass can build
/// grids straight from the caller's state without cloning it.
#[derive(Clone, Copy)]
pub struct GridRequest<'a> {
    pub year: i32,
    pub month: u32,
    pub week_start: Weekday,
    pub selection: Option<&'a Selection>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled: Option<&'a dyn Fn(NaiveDate) -> bool>,
    pub highlighted: Option<&'a BTreeSet<NaiveDate>>,
}

impl<'a> GridRequest<'a> {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            week_start: Weekday::Sun,
            selection: None,
            min_date: None,
            max_date: None,
            disabled: None,
            highlighted: None,
        }
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_selection(mut self, selection: &'a Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_min_date(mut self, min_date: Option<NaiveDate>) -> Self {
        self.min_date = min_date;
        self
    }

    pub fn with_max_date(mut self, max_date: Option<NaiveDate>) -> Self {
        self.max_date = max_date;
        self
    }

    pub fn with_disabled(mut self, disabled: &'a dyn Fn(NaiveDate) -> bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn with_highlighted(mut self, highlighted: &'a BTreeSet<NaiveDate>) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    /// Same request shifted by `delta` months.
    pub fn offset_months(self, delta: i32) -> Result<Self, CalendarError> {
        let first = first_of_month(self.year, self.month)?;
        let shifted =
            add_months(first, delta).ok_or(CalendarError::YearOutOfRange(self.year))?;
        Ok(Self {
            year: shifted.year(),
            month: shifted.month(),
            ..self
        })
    }

    /// Date-only bounds check plus the caller's predicate.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min)
            || self.max_date.is_some_and(|max| date > max)
            || self.disabled.is_some_and(|filter| filter(date))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SelectionFlags {
    selected: bool,
    in_range: bool,
    range_start: bool,
    range_end: bool,
}

impl MonthGrid {
    /// Lays out the month as 4-6 rows of 7 days, starting on the request's
    /// week start and padding with days of the neighbouring months.
    pub fn build(request: &GridRequest<'_>, clock: &dyn Clock) -> Result<Self, CalendarError> {
        let first = first_of_month(request.year, request.month)?;
        let last = last_of_month(request.year, request.month)?;
        // Every cell of the padded grid must be a real date.
        if checked_add_days(first, -(DAYS_PER_WEEK as i64 - 1)).is_none()
            || checked_add_days(first, MAX_SPAN_DAYS).is_none()
        {
            return Err(CalendarError::YearOutOfRange(request.year));
        }
        let today = clock.today();

        let mut weeks = Vec::with_capacity(MAX_ROWS);
        let mut row_start = start_of_week(first, request.week_start);

        while weeks.len() < MAX_ROWS {
            if weeks.len() >= MIN_ROWS && row_start > last {
                break;
            }
            weeks.push(build_row(request, row_start, today));
            row_start = add_days(row_start, DAYS_PER_WEEK as i64);
        }

        Ok(Self {
            year: request.year,
            month: request.month,
            weeks,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    pub fn find(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

/// Builds `count` consecutive months starting at the request's month.
pub fn build_months(
    request: &GridRequest<'_>,
    count: usize,
    clock: &dyn Clock,
) -> Result<Vec<MonthGrid>, CalendarError> {
    (0..count)
        .map(|offset| {
            let shifted = request.offset_months(offset as i32)?;
            MonthGrid::build(&shifted, clock)
        })
        .collect()
}

fn build_row(request: &GridRequest<'_>, start_date: NaiveDate, today: NaiveDate) -> WeekRow {
    let anchor = row_anchor(start_date);
    let week_year = iso_week_year(anchor);
    let days = std::array::from_fn(|offset| {
        let date = add_days(start_date, offset as i64);
        let flags = selection_flags(request.selection, date, start_date, week_year, offset);
        DayCell {
            date,
            is_current_month: date.year() == request.year && date.month() == request.month,
            is_today: date == today,
            is_selected: flags.selected,
            is_in_range: flags.in_range,
            is_range_start: flags.range_start,
            is_range_end: flags.range_end,
            is_disabled: request.is_disabled(date),
            is_highlighted: request
                .highlighted
                .is_some_and(|highlighted| highlighted.contains(&date)),
            week_number: week_number(date),
        }
    });

    WeekRow {
        week_number: week_number(anchor),
        week_year,
        days,
        start_date,
        end_date: add_days(start_date, DAYS_PER_WEEK as i64 - 1),
    }
}

fn selection_flags(
    selection: Option<&Selection>,
    date: NaiveDate,
    row_start: NaiveDate,
    row_year: i32,
    offset: usize,
) -> SelectionFlags {
    let Some(selection) = selection else {
        return SelectionFlags::default();
    };

    match selection {
        Selection::Quarter(Some(quarter)) => {
            let range_start = date == quarter.start_date;
            let range_end = date == quarter.end_date;
            SelectionFlags {
                // Only the quarter's boundary days count as selected.
                selected: range_start || range_end,
                in_range: quarter.contains(date),
                range_start,
                range_end,
            }
        }
        Selection::Week(Some(week)) => {
            if week.start_date == row_start && week.year == row_year {
                SelectionFlags {
                    selected: true,
                    in_range: true,
                    range_start: offset == 0,
                    range_end: offset == DAYS_PER_WEEK - 1,
                }
            } else {
                SelectionFlags::default()
            }
        }
        Selection::Multiple(values) => SelectionFlags {
            selected: values.contains(date),
            ..SelectionFlags::default()
        },
        Selection::Range(range) => {
            let range_start = range.start.is_some_and(|start| start.date == date);
            let range_end = range.end.is_some_and(|end| end.date == date);
            SelectionFlags {
                selected: range_start || range_end,
                in_range: range.contains(date),
                range_start,
                range_end,
            }
        }
        Selection::Single(Some(value)) => SelectionFlags {
            selected: value.date == date,
            ..SelectionFlags::default()
        },
        Selection::Single(None) | Selection::Week(None) | Selection::Quarter(None) => {
            SelectionFlags::default()
        }
    }
}
