pub mod clock;
pub mod date;
pub mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use value::{
    DateTimeValue, MultipleValue, QuarterValue, RangeValue, Selection, SelectionMode, TimeOfDay,
    WeekValue, is_time_disabled,
};
