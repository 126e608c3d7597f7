use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::date::weekday_from_index;
use crate::core::value::SelectionMode;
use crate::error::ConfigError;
use crate::format::fmt;
use crate::locale::{DEFAULT_LOCALE, LocaleService};

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_format() -> String {
    fmt::DATE_MDY.to_string()
}

fn default_months_shown() -> usize {
    1
}

/// Declarative picker setup, typically loaded from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    pub mode: SelectionMode,
    pub locale: String,
    /// 0 = Sunday .. 6 = Saturday. Falls back to the locale's first day.
    pub week_start: Option<u8>,
    pub format: String,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub months_shown: usize,
    /// Attach boundary times to range endpoints and keep parsed times.
    pub show_time: bool,
    pub highlighted: Vec<NaiveDate>,
    /// Weekday indices (0 = Sunday) that can never be selected.
    pub disabled_weekdays: Vec<u8>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            locale: default_locale(),
            week_start: None,
            format: default_format(),
            min_date: None,
            max_date: None,
            months_shown: default_months_shown(),
            show_time: false,
            highlighted: Vec::new(),
            disabled_weekdays: Vec::new(),
        }
    }
}

impl PickerConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        if let Err(err) = &result {
            warn!(error = %err, "picker config rejected");
        }
        result
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.format.trim().is_empty() {
            return Err(ConfigError::invalid("format", "pattern is empty"));
        }
        if self.months_shown == 0 {
            return Err(ConfigError::invalid("months_shown", "must be at least 1"));
        }
        if let Some(index) = self.week_start {
            weekday_from_index(index)?;
        }
        for index in &self.disabled_weekdays {
            weekday_from_index(*index)?;
        }
        if let (Some(min), Some(max)) = (self.min_date, self.max_date)
            && min > max
        {
            return Err(ConfigError::invalid(
                "min_date",
                format!("{min} is after max_date {max}"),
            ));
        }
        Ok(())
    }

    /// Configured week start, else the locale's first day of week.
    pub fn resolved_week_start(&self, locales: &dyn LocaleService) -> Weekday {
        self.week_start
            .and_then(|index| weekday_from_index(index).ok())
            .unwrap_or_else(|| locales.first_day_of_week(&self.locale))
    }

    pub fn disabled_weekday_set(&self) -> Vec<Weekday> {
        self.disabled_weekdays
            .iter()
            .filter_map(|index| weekday_from_index(*index).ok())
            .collect()
    }
}
