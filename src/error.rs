use chrono::NaiveDate;
use thiserror::Error;

/// Caller-side mistakes detected by the calendar primitives and the grid builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("invalid week start index: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekStart(u8),
    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i32),
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("invalid time {hours:02}:{minutes:02}:{seconds:02}")]
    InvalidTime { hours: u8, minutes: u8, seconds: u8 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Rejections of typed user input. These are validation signals, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("`{0}` does not match the expected format")]
    Unparseable(String),
    #[error("{0} is outside the allowed range")]
    OutOfBounds(NaiveDate),
    #[error("{0} is not selectable")]
    Disabled(NaiveDate),
}
