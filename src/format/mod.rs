//! Pattern-driven date formatting, parsing and typing masks.
//!
//! Patterns use `YYYY YY MMMM MMM MM M DD D dddd ddd HH H hh h mm ss A a`;
//! any other character is literal text. All entry points are pure functions
//! of their inputs.

mod display;
mod mask;
mod model;
mod parse;
mod parser;

use chrono::{NaiveDate, NaiveDateTime};

pub use display::{format_segments, format_value, generate_mask};
pub use mask::{apply_mask_segments, apply_typing_mask, mask_capacity};
pub use model::{FormatSegment, FormatToken, TokenRole, Width};
pub use parse::{parse_segments, parse_value};
pub use parser::parse_format;

use crate::core::date::{end_of_day, start_of_day};

/// Inclusive bounds check: `min` counts from its start of day, `max` up to
/// its end of day.
pub fn is_date_in_bounds(
    value: NaiveDateTime,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> bool {
    min.is_none_or(|min| value >= start_of_day(min)) && max.is_none_or(|max| value <= end_of_day(max))
}

pub mod fmt {
    pub const DATE_DMY: &str = "DD/MM/YYYY";
    pub const DATE_MDY: &str = "MM/DD/YYYY";
    pub const DATE_YMD: &str = "YYYY-MM-DD";
    pub const DATE_LONG: &str = "dddd, MMMM DD, YYYY";
    pub const TIME_HM: &str = "HH:mm";
    pub const TIME_HMS: &str = "HH:mm:ss";
    pub const TIME_12H: &str = "hh:mm A";
    pub const DATETIME_DMY_HM: &str = "DD/MM/YYYY HH:mm";
    pub const DATETIME_YMD_HM: &str = "YYYY-MM-DD HH:mm";
    pub const DATETIME_DMY_HMS: &str = "DD/MM/YYYY HH:mm:ss";
}
