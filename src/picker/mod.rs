//! Headless date picker state.
//!
//! [`DatePicker`] owns the authoritative selection, the visible month and the
//! text-field buffer, and recomputes grids and display text from the pure
//! calendar and format engines on demand. Rendering and focus handling stay
//! with the caller.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use tracing::{debug, trace};

use crate::calendar::{DateFilter, GridRequest, MonthGrid, RangePhase, build_months};
use crate::config::PickerConfig;
use crate::core::clock::Clock;
use crate::core::date::{add_months, first_of_month};
use crate::core::value::{
    DateTimeValue, QuarterValue, RangeValue, Selection, SelectionMode, TimeOfDay, WeekValue,
};
use crate::error::{CalendarError, ConfigError, InputError};
use crate::format::{
    FormatSegment, apply_mask_segments, format_segments, generate_mask, is_date_in_bounds,
    parse_format, parse_segments,
};
use crate::locale::{LocaleService, TextDirection};

pub type SharedLocales = Arc<dyn LocaleService + Send + Sync>;

pub struct DatePicker {
    config: PickerConfig,
    locales: SharedLocales,
    segments: Vec<FormatSegment>,
    week_start: Weekday,
    disabled_weekdays: Vec<Weekday>,
    highlighted: BTreeSet<NaiveDate>,
    disabled: Option<Box<DateFilter>>,

    selection: Selection,
    /// First day of the first visible month.
    view: NaiveDate,
    input: String,
}

impl DatePicker {
    pub fn new(
        config: PickerConfig,
        locales: SharedLocales,
        clock: &dyn Clock,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let today = clock.today();
        let segments = parse_format(&config.format);
        let week_start = config.resolved_week_start(locales.as_ref());
        Ok(Self {
            segments,
            week_start,
            disabled_weekdays: config.disabled_weekday_set(),
            highlighted: config.highlighted.iter().copied().collect(),
            disabled: None,
            selection: Selection::empty(config.mode),
            view: first_of_month(today.year(), today.month())?,
            input: String::new(),
            locales,
            config,
        })
    }

    pub fn with_disabled(
        mut self,
        filter: impl Fn(NaiveDate) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.disabled = Some(Box::new(filter));
        self
    }

    pub fn with_highlighted(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.highlighted.extend(dates);
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn text_direction(&self) -> TextDirection {
        self.locales.text_direction(&self.config.locale)
    }

    /// `(year, month)` of the first visible month.
    pub fn view_month(&self) -> (i32, u32) {
        (self.view.year(), self.view.month())
    }

    /// Placeholder for an empty text field, e.g. `mm/dd/yyyy`.
    pub fn placeholder(&self) -> String {
        generate_mask(&self.segments)
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// `None` outside range mode.
    pub fn range_phase(&self) -> Option<RangePhase> {
        match &self.selection {
            Selection::Range(range) => Some(range.phase()),
            _ => None,
        }
    }

    /// Replaces the selection. Values of another mode are ignored.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        if selection.mode() != self.mode() {
            debug!(expected = ?self.mode(), got = ?selection.mode(), "selection mode mismatch");
            return false;
        }
        self.selection = selection;
        self.input = self.display_text();
        true
    }

    // ── View navigation ───────────────────────────────────────────────────────

    /// Moves the view by `delta` months. Returns false, leaving the view
    /// unchanged, when the target month is outside the supported range.
    pub fn month_delta(&mut self, delta: i32) -> bool {
        let Some(view) = add_months(self.view, delta) else {
            debug!(delta, "view move past the supported range ignored");
            return false;
        };
        self.view = view;
        trace!(year = self.view.year(), month = self.view.month(), "view moved");
        true
    }

    pub fn next_month(&mut self) -> bool {
        self.month_delta(1)
    }

    pub fn prev_month(&mut self) -> bool {
        self.month_delta(-1)
    }

    pub fn next_year(&mut self) -> bool {
        self.month_delta(12)
    }

    pub fn prev_year(&mut self) -> bool {
        self.month_delta(-12)
    }

    pub fn set_view(&mut self, year: i32, month: u32) -> Result<(), CalendarError> {
        self.view = first_of_month(year, month)?;
        Ok(())
    }

    fn show(&mut self, date: NaiveDate) {
        self.view = date.with_day(1).unwrap_or(date);
    }

    // ── Grid ──────────────────────────────────────────────────────────────────

    fn is_blocked(&self, date: NaiveDate) -> bool {
        self.disabled_weekdays.contains(&date.weekday())
            || self.disabled.as_ref().is_some_and(|filter| filter(date))
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        let in_bounds = self.config.min_date.is_none_or(|min| date >= min)
            && self.config.max_date.is_none_or(|max| date <= max);
        in_bounds && !self.is_blocked(date)
    }

    /// One grid per visible month, starting at the view month.
    pub fn grids(&self, clock: &dyn Clock) -> Result<Vec<MonthGrid>, CalendarError> {
        let blocked = |date: NaiveDate| self.is_blocked(date);
        let request = GridRequest::new(self.view.year(), self.view.month())
            .with_week_start(self.week_start)
            .with_selection(&self.selection)
            .with_min_date(self.config.min_date)
            .with_max_date(self.config.max_date)
            .with_disabled(&blocked)
            .with_highlighted(&self.highlighted);
        build_months(&request, self.config.months_shown, clock)
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Handles a click on a day cell. Returns false if the day is not
    /// selectable.
    pub fn click_day(&mut self, date: NaiveDate) -> bool {
        if !self.is_selectable(date) {
            trace!(%date, "click on disabled day ignored");
            return false;
        }

        let show_time = self.config.show_time;
        let week_start = self.week_start;
        match &mut self.selection {
            Selection::Single(value) => {
                let time = show_time
                    .then(|| value.and_then(|v| v.time).unwrap_or(TimeOfDay::START_OF_DAY));
                *value = Some(DateTimeValue { date, time });
            }
            Selection::Range(range) => range.click(date, show_time),
            Selection::Multiple(values) => {
                values.toggle(DateTimeValue::date(date));
            }
            Selection::Week(value) => *value = Some(WeekValue::containing(date, week_start)),
            Selection::Quarter(value) => *value = Some(QuarterValue::containing(date)),
        }
        self.input = self.display_text();
        true
    }

    /// The "today" shortcut. Range mode gets a completed single-day range so
    /// the next click starts a fresh one.
    pub fn select_today(&mut self, clock: &dyn Clock) -> bool {
        let today = clock.today();
        if !self.is_selectable(today) {
            return false;
        }

        let show_time = self.config.show_time;
        let bounded = |time: TimeOfDay| {
            if show_time {
                DateTimeValue::with_time(today, time)
            } else {
                DateTimeValue::date(today)
            }
        };
        match self.mode() {
            SelectionMode::Range => {
                let range = RangeValue::new(
                    Some(bounded(TimeOfDay::START_OF_DAY)),
                    Some(bounded(TimeOfDay::END_OF_DAY)),
                );
                self.selection = Selection::Range(range);
            }
            SelectionMode::Multiple => self.insert_multiple(today),
            SelectionMode::Single | SelectionMode::Week | SelectionMode::Quarter => {
                self.click_day(today);
            }
        }
        self.show(today);
        self.input = self.display_text();
        true
    }

    /// Adds `date` to a multiple selection without toggling it off.
    fn insert_multiple(&mut self, date: NaiveDate) {
        if let Selection::Multiple(values) = &mut self.selection
            && !values.contains(date)
        {
            values.toggle(DateTimeValue::date(date));
        }
    }

    pub fn clear(&mut self) {
        self.selection = Selection::empty(self.mode());
        self.input.clear();
    }

    // ── Text input ────────────────────────────────────────────────────────────

    /// Re-masks the field after a keystroke and returns the new contents.
    pub fn type_input(&mut self, raw: &str) -> &str {
        self.input = apply_mask_segments(raw, &self.segments);
        &self.input
    }

    /// Stores pasted text as-is, for patterns the digit mask cannot express.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Parses the field and applies it to the selection.
    ///
    /// An empty field clears a single-date selection. Multiple mode adds the
    /// date if it is not selected yet; the other modes treat it like a click
    /// on that day.
    pub fn commit_input(&mut self) -> Result<Option<NaiveDateTime>, InputError> {
        if self.input.trim().is_empty() {
            if self.mode() == SelectionMode::Single {
                self.selection = Selection::Single(None);
            }
            return Ok(None);
        }

        let Some(parsed) = parse_segments(
            &self.input,
            &self.segments,
            self.locales.as_ref(),
            &self.config.locale,
        ) else {
            return Err(InputError::Unparseable(self.input.clone()));
        };

        let date = parsed.date();
        if !is_date_in_bounds(parsed, self.config.min_date, self.config.max_date) {
            return Err(InputError::OutOfBounds(date));
        }
        if self.is_blocked(date) {
            return Err(InputError::Disabled(date));
        }

        match self.mode() {
            SelectionMode::Single => {
                let value = if self.config.show_time {
                    DateTimeValue::from(parsed)
                } else {
                    DateTimeValue::date(date)
                };
                self.selection = Selection::Single(Some(value));
            }
            SelectionMode::Multiple => self.insert_multiple(date),
            SelectionMode::Range | SelectionMode::Week | SelectionMode::Quarter => {
                self.click_day(date);
            }
        }
        self.show(date);
        self.input = self.display_text();
        debug!(%parsed, "typed date committed");
        Ok(Some(parsed))
    }

    // ── Display ───────────────────────────────────────────────────────────────

    fn format(&self, value: &DateTimeValue) -> String {
        format_segments(
            &value.to_naive(),
            &self.segments,
            self.locales.as_ref(),
            &self.config.locale,
        )
    }

    fn format_span(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{} - {}",
            self.format(&DateTimeValue::date(start)),
            self.format(&DateTimeValue::date(end))
        )
    }

    /// The selection rendered with the configured pattern.
    pub fn display_text(&self) -> String {
        match &self.selection {
            Selection::Single(value) => value.map(|v| self.format(&v)).unwrap_or_default(),
            Selection::Range(range) => match (range.start, range.end) {
                (Some(start), Some(end)) => {
                    format!("{} - {}", self.format(&start), self.format(&end))
                }
                (Some(only), None) | (None, Some(only)) => self.format(&only),
                (None, None) => String::new(),
            },
            Selection::Multiple(values) => values
                .as_slice()
                .iter()
                .map(|value| self.format(value))
                .collect::<Vec<_>>()
                .join(", "),
            Selection::Week(value) => value
                .map(|week| self.format_span(week.start_date, week.end_date))
                .unwrap_or_default(),
            Selection::Quarter(value) => value
                .map(|quarter| self.format_span(quarter.start_date, quarter.end_date))
                .unwrap_or_default(),
        }
    }
}
