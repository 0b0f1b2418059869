//! Day settings: the raw request shape and its validated form.
//!
//! [`SettingsInput`] mirrors what a client sends, with every field optional.
//! [`DaySettings`] can only be obtained through validation, so the planner
//! never sees a malformed day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time::{parse_date, parse_time_of_day};
use crate::error::ValidationError;

/// Settings as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub day_start: Option<String>,
    #[serde(default)]
    pub day_end: Option<String>,
    #[serde(default)]
    pub focus_block_minutes: Option<u32>,
    #[serde(default)]
    pub short_break_minutes: Option<u32>,
    #[serde(default)]
    pub buffer_minutes: Option<u32>,
}

impl SettingsInput {
    /// Settings for `date` between `day_start` and `day_end`, rhythm left to defaults.
    pub fn new(date: &str, day_start: &str, day_end: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            day_start: Some(day_start.to_string()),
            day_end: Some(day_end.to_string()),
            ..Self::default()
        }
    }

    pub fn with_rhythm(mut self, focus_block: u32, short_break: u32, buffer: u32) -> Self {
        self.focus_block_minutes = Some(focus_block);
        self.short_break_minutes = Some(short_break);
        self.buffer_minutes = Some(buffer);
        self
    }
}

/// Work rhythm used when a request leaves it out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanDefaults {
    #[serde(default = "default_focus_block_minutes")]
    pub focus_block_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,
}

fn default_focus_block_minutes() -> u32 {
    52
}
fn default_short_break_minutes() -> u32 {
    10
}
fn default_buffer_minutes() -> u32 {
    5
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            focus_block_minutes: default_focus_block_minutes(),
            short_break_minutes: default_short_break_minutes(),
            buffer_minutes: default_buffer_minutes(),
        }
    }
}

/// Validated shape of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySettings {
    date: NaiveDate,
    day_start: NaiveTime,
    day_end: NaiveTime,
    focus_block_minutes: u32,
    short_break_minutes: u32,
    buffer_minutes: u32,
}

impl DaySettings {
    /// Validate typed settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `day_end` is not later than `day_start`, or if
    /// the focus block or break length is zero.
    pub fn new(
        date: NaiveDate,
        day_start: NaiveTime,
        day_end: NaiveTime,
        focus_block_minutes: u32,
        short_break_minutes: u32,
        buffer_minutes: u32,
    ) -> Result<Self, ValidationError> {
        if day_end <= day_start {
            return Err(ValidationError::InvalidTimeRange {
                start: day_start,
                end: day_end,
            });
        }
        if focus_block_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "focusBlockMinutes",
                message: "must be positive".to_string(),
            });
        }
        if short_break_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "shortBreakMinutes",
                message: "must be positive".to_string(),
            });
        }

        Ok(Self {
            date,
            day_start,
            day_end,
            focus_block_minutes,
            short_break_minutes,
            buffer_minutes,
        })
    }

    /// Validate client settings, filling the rhythm from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns an error if `date`, `dayStart` or `dayEnd` is missing, empty
    /// or unparseable, or if [`DaySettings::new`] rejects the values.
    pub fn from_input(
        input: &SettingsInput,
        defaults: &PlanDefaults,
    ) -> Result<Self, ValidationError> {
        let date_raw = required(&input.date, "date")?;
        let start_raw = required(&input.day_start, "dayStart")?;
        let end_raw = required(&input.day_end, "dayEnd")?;

        let date = parse_date(date_raw).ok_or_else(|| ValidationError::InvalidDate {
            field: "date",
            value: date_raw.to_string(),
        })?;
        let day_start = parse_time_of_day(start_raw).ok_or_else(|| ValidationError::InvalidTime {
            field: "dayStart",
            value: start_raw.to_string(),
        })?;
        let day_end = parse_time_of_day(end_raw).ok_or_else(|| ValidationError::InvalidTime {
            field: "dayEnd",
            value: end_raw.to_string(),
        })?;

        Self::new(
            date,
            day_start,
            day_end,
            input.focus_block_minutes.unwrap_or(defaults.focus_block_minutes),
            input.short_break_minutes.unwrap_or(defaults.short_break_minutes),
            input.buffer_minutes.unwrap_or(defaults.buffer_minutes),
        )
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn focus_block_minutes(&self) -> u32 {
        self.focus_block_minutes
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break_minutes
    }

    pub fn buffer_minutes(&self) -> u32 {
        self.buffer_minutes
    }

    /// Absolute start and end of the schedulable day.
    pub fn envelope(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.date.and_time(self.day_start),
            self.date.and_time(self.day_end),
        )
    }
}

impl TryFrom<&SettingsInput> for DaySettings {
    type Error = ValidationError;

    fn try_from(input: &SettingsInput) -> Result<Self, Self::Error> {
        Self::from_input(input, &PlanDefaults::default())
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_complete_settings() {
        let input = SettingsInput::new("2024-05-01", "08:00", "22:00").with_rhythm(52, 10, 5);
        let settings = DaySettings::try_from(&input).unwrap();
        let (start, end) = settings.envelope();

        assert_eq!(start.to_string(), "2024-05-01 08:00:00");
        assert_eq!(end.to_string(), "2024-05-01 22:00:00");
        assert_eq!(settings.buffer_minutes(), 5);
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = DaySettings::try_from(&SettingsInput::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "date" });

        let input = SettingsInput {
            day_start: Some("  ".into()),
            ..SettingsInput::new("2024-05-01", "", "22:00")
        };
        let err = DaySettings::try_from(&input).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "dayStart" });
    }

    #[test]
    fn rejects_inverted_or_empty_day() {
        let err = DaySettings::try_from(&SettingsInput::new("2024-05-01", "22:00", "08:00"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));

        let err = DaySettings::try_from(&SettingsInput::new("2024-05-01", "09:00", "09:00"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = DaySettings::try_from(&SettingsInput::new("May 1st", "08:00", "22:00"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "date", .. }));

        let err = DaySettings::try_from(&SettingsInput::new("2024-05-01", "8am", "22:00"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTime { field: "dayStart", .. }));
    }

    #[test]
    fn rejects_zero_rhythm() {
        let input = SettingsInput::new("2024-05-01", "08:00", "22:00").with_rhythm(0, 10, 5);
        assert!(matches!(
            DaySettings::try_from(&input),
            Err(ValidationError::InvalidValue { field: "focusBlockMinutes", .. })
        ));

        let input = SettingsInput::new("2024-05-01", "08:00", "22:00").with_rhythm(25, 0, 5);
        assert!(matches!(
            DaySettings::try_from(&input),
            Err(ValidationError::InvalidValue { field: "shortBreakMinutes", .. })
        ));
    }

    #[test]
    fn absent_rhythm_uses_defaults() {
        let defaults = PlanDefaults {
            focus_block_minutes: 25,
            short_break_minutes: 5,
            buffer_minutes: 0,
        };
        let mut input = SettingsInput::new("2024-05-01", "08:00", "12:00");
        input.buffer_minutes = Some(3);

        let settings = DaySettings::from_input(&input, &defaults).unwrap();
        assert_eq!(settings.focus_block_minutes(), 25);
        assert_eq!(settings.short_break_minutes(), 5);
        assert_eq!(settings.buffer_minutes(), 3);
    }

    #[test]
    fn settings_input_reads_camel_case() {
        let json = r#"{"date":"2024-05-01","dayStart":"08:00","dayEnd":"22:00","focusBlockMinutes":52}"#;
        let input: SettingsInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.day_start.as_deref(), Some("08:00"));
        assert_eq!(input.focus_block_minutes, Some(52));
        assert_eq!(input.short_break_minutes, None);
    }
}
