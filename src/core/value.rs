use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Wall-clock time, 00:00:00 to 23:59:59. Field order makes the derived
/// ordering match total seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay")]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

#[derive(Deserialize)]
struct RawTimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = CalendarError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hours, raw.minutes, raw.seconds).ok_or(CalendarError::InvalidTime {
            hours: raw.hours,
            minutes: raw.minutes,
            seconds: raw.seconds,
        })
    }
}

impl TimeOfDay {
    pub const START_OF_DAY: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub const END_OF_DAY: Self = Self {
        hours: 23,
        minutes: 59,
        seconds: 59,
    };

    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    pub fn total_seconds(self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours as u32, self.minutes as u32, self.seconds as u32)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hours: time.hour() as u8,
            minutes: time.minute() as u8,
            // Leap seconds are folded into :59.
            seconds: time.second().min(59) as u8,
        }
    }

    pub fn to_hhmmss(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// True when `time` falls outside `[min, max]`. Either bound may be absent.
pub fn is_time_disabled(time: TimeOfDay, min: Option<TimeOfDay>, max: Option<TimeOfDay>) -> bool {
    min.is_some_and(|min| time < min) || max.is_some_and(|max| time > max)
}

/// A calendar date with an optional time of day attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOfDay>,
}

impl DateTimeValue {
    pub fn date(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    pub fn with_time(date: NaiveDate, time: TimeOfDay) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Missing time reads as start of day.
    pub fn to_naive(self) -> NaiveDateTime {
        self.date
            .and_time(self.time.unwrap_or(TimeOfDay::START_OF_DAY).to_naive_time())
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::with_time(value.date(), TimeOfDay::from_naive_time(value.time()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeValue {
    pub start: Option<DateTimeValue>,
    pub end: Option<DateTimeValue>,
}

/// Dates kept ascending, one entry per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<DateTimeValue>")]
pub struct MultipleValue(pub(crate) Vec<DateTimeValue>);

impl MultipleValue {
    pub fn as_slice(&self) -> &[DateTimeValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0
            .binary_search_by(|value| value.date.cmp(&date))
            .is_ok()
    }
}

impl From<Vec<DateTimeValue>> for MultipleValue {
    fn from(values: Vec<DateTimeValue>) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<DateTimeValue> for MultipleValue {
    fn from_iter<I: IntoIterator<Item = DateTimeValue>>(iter: I) -> Self {
        let mut values: Vec<DateTimeValue> = iter.into_iter().collect();
        values.sort_by_key(|value| value.date);
        values.dedup_by_key(|value| value.date);
        Self(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekValue {
    pub week_number: u32,
    /// ISO week-year of the row's Thursday, not the calendar year of
    /// `start_date`: the Sunday-start row from 2024-12-29 belongs to 2025.
    /// Grid rows only match a value whose `year` follows this rule, so build
    /// values with [`WeekValue::containing`].
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterValue {
    pub quarter: u8,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
    Multiple,
    Week,
    Quarter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum Selection {
    Single(Option<DateTimeValue>),
    Range(RangeValue),
    Multiple(MultipleValue),
    Week(Option<WeekValue>),
    Quarter(Option<QuarterValue>),
}

impl Selection {
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Range => Self::Range(RangeValue::default()),
            SelectionMode::Multiple => Self::Multiple(MultipleValue::default()),
            SelectionMode::Week => Self::Week(None),
            SelectionMode::Quarter => Self::Quarter(None),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Range(_) => SelectionMode::Range,
            Self::Multiple(_) => SelectionMode::Multiple,
            Self::Week(_) => SelectionMode::Week,
            Self::Quarter(_) => SelectionMode::Quarter,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_none(),
            Self::Range(range) => range.start.is_none() && range.end.is_none(),
            Self::Multiple(values) => values.is_empty(),
            Self::Week(value) => value.is_none(),
            Self::Quarter(value) => value.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn time_of_day_orders_by_total_seconds() {
        let morning = TimeOfDay::new(9, 30, 0).expect("time");
        let evening = TimeOfDay::new(18, 0, 5).expect("time");
        assert!(morning < evening);
        assert_eq!(TimeOfDay::END_OF_DAY.total_seconds(), 86_399);
        assert!(TimeOfDay::new(24, 0, 0).is_none());
        assert!(TimeOfDay::new(12, 60, 0).is_none());
    }

    #[test]
    fn out_of_range_time_fails_to_deserialize() {
        let err = serde_json::from_str::<TimeOfDay>(r#"{"hours":25,"minutes":99,"seconds":0}"#)
            .expect_err("hours past 23");
        assert!(err.to_string().contains("invalid time 25:99:00"));
        assert!(serde_json::from_str::<TimeOfDay>(r#"{"hours":23,"minutes":59,"seconds":60}"#).is_err());

        let time: TimeOfDay =
            serde_json::from_str(r#"{"hours":23,"minutes":59,"seconds":59}"#).expect("valid");
        assert_eq!(time, TimeOfDay::END_OF_DAY);

        let json = r#"{"mode":"single","value":{"date":"2024-06-15","time":{"hours":24,"minutes":0,"seconds":0}}}"#;
        assert!(serde_json::from_str::<Selection>(json).is_err());
    }

    #[test]
    fn time_disabled_outside_bounds() {
        let min = TimeOfDay::new(9, 0, 0);
        let max = TimeOfDay::new(17, 0, 0);
        let early = TimeOfDay::new(8, 59, 59).expect("time");
        let noon = TimeOfDay::new(12, 0, 0).expect("time");
        let late = TimeOfDay::new(17, 0, 1).expect("time");
        assert!(is_time_disabled(early, min, max));
        assert!(!is_time_disabled(noon, min, max));
        assert!(is_time_disabled(late, min, max));
        assert!(!is_time_disabled(late, None, None));
    }

    #[test]
    fn multiple_value_sorts_and_dedups() {
        let values: MultipleValue = [
            DateTimeValue::date(ymd(2024, 6, 20)),
            DateTimeValue::date(ymd(2024, 6, 10)),
            DateTimeValue::with_time(ymd(2024, 6, 20), TimeOfDay::END_OF_DAY),
        ]
        .into_iter()
        .collect();
        let dates: Vec<NaiveDate> = values.as_slice().iter().map(|v| v.date).collect();
        assert_eq!(dates, vec![ymd(2024, 6, 10), ymd(2024, 6, 20)]);
        assert!(values.contains(ymd(2024, 6, 10)));
        assert!(!values.contains(ymd(2024, 6, 11)));
    }

    #[test]
    fn selection_serializes_with_mode_tag() {
        let selection = Selection::Single(Some(DateTimeValue::date(ymd(2024, 6, 15))));
        let json = serde_json::to_string(&selection).expect("serialize");
        assert_eq!(json, r#"{"mode":"single","value":{"date":"2024-06-15"}}"#);
        let back: Selection = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, selection);
        assert_eq!(back.mode(), SelectionMode::Single);
    }
}
