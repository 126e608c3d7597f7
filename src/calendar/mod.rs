//! Month grid computation and selection models.
//!
//! [`MonthGrid::build`] turns a [`GridRequest`] into rows of seven
//! [`DayCell`]s tagged with today/selection/range/disabled/highlight flags.
//! It keeps no state; callers rebuild the grid whenever their inputs change.

mod grid;
mod selection;

pub use grid::{DateFilter, DayCell, GridRequest, MonthGrid, WeekRow, build_months};
pub use selection::RangePhase;
