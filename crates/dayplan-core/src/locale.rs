//! User-facing message catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PlanError, ValidationError};

/// Language of user-facing text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pl,
}

impl Locale {
    /// Short message for a failed planning request.
    pub fn message_for(self, err: &PlanError) -> &'static str {
        match err {
            PlanError::Validation(ValidationError::MissingField { .. }) => self.missing_settings(),
            _ => self.invalid_data(),
        }
    }

    pub fn missing_settings(self) -> &'static str {
        match self {
            Locale::En => "Missing required settings",
            Locale::Pl => "Brak wymaganych ustawień",
        }
    }

    pub fn invalid_data(self) -> &'static str {
        match self {
            Locale::En => "Invalid data",
            Locale::Pl => "Nieprawidłowe dane",
        }
    }

    /// Title of generated break blocks.
    pub fn break_title(self) -> &'static str {
        match self {
            Locale::En => "Break",
            Locale::Pl => "Przerwa",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Pl => write!(f, "pl"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pl" => Ok(Locale::Pl),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_their_own_message() {
        let missing = PlanError::from(ValidationError::MissingField { field: "dayEnd" });
        let range = PlanError::from(ValidationError::InvalidTimeRange {
            start: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        });

        assert_eq!(Locale::Pl.message_for(&missing), "Brak wymaganych ustawień");
        assert_eq!(Locale::En.message_for(&range), "Invalid data");
    }

    #[test]
    fn parses_locale_names() {
        assert_eq!("PL".parse::<Locale>(), Ok(Locale::Pl));
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
    }
}
