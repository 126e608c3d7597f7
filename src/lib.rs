pub mod calendar;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod locale;
pub mod picker;

pub use crate::core::clock::{Clock, FixedClock, SystemClock};
pub use crate::core::date::week_number;
pub use crate::core::value::{
    DateTimeValue, MultipleValue, QuarterValue, RangeValue, Selection, SelectionMode, TimeOfDay,
    WeekValue,
};

pub use calendar::{DayCell, GridRequest, MonthGrid, RangePhase, WeekRow, build_months};
pub use config::PickerConfig;
pub use error::{CalendarError, ConfigError, InputError};
pub use format::{
    apply_typing_mask, format_value, generate_mask, is_date_in_bounds, parse_format, parse_value,
};
pub use locale::{LocaleRegistry, LocaleService, LocaleTable, TextDirection};
pub use picker::DatePicker;
