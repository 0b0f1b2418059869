//! Parsing and serde helpers for local wall-clock values.
//!
//! All timestamps are naive: the day is planned on the caller's local clock
//! and no timezone conversion happens anywhere in the engine.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical serialized form of a timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` (optionally with fractional seconds),
/// `YYYY-MM-DDTHH:MM` as produced by `datetime-local` inputs, and RFC 3339
/// with an offset, in which case the local wall-clock part is kept.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
}

/// Parse a calendar date from the first ten characters of `value`.
///
/// Longer values such as `2024-05-01T00:00:00Z` resolve to their date part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let head = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Format a timestamp in its canonical form.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter for required timestamps.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Serde adapter for optional dates where `null`, absence and `""` all mean
/// "no date".
pub mod date_opt {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(super::DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_date(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn parses_timestamp_shapes() {
        assert_eq!(parse_timestamp("2024-05-01T10:00:00"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2024-05-01T10:15"), Some(at(10, 15, 0)));
        assert_eq!(
            parse_timestamp("2024-05-01T10:00:30.250"),
            Some(at(10, 0, 30) + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_timestamp("2024-05-01T10:00:00+02:00"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00Z"), Some(at(10, 0, 0)));
        assert_eq!(parse_timestamp("tomorrow"), None);
    }

    #[test]
    fn parses_date_prefix() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_date("2024-05-01"), Some(day));
        assert_eq!(parse_date("2024-05-01T00:00:00.000Z"), Some(day));
        assert_eq!(parse_date("05/01/2024"), None);
        assert_eq!(parse_date("2024"), None);
    }

    #[test]
    fn parses_time_of_day() {
        assert_eq!(parse_time_of_day("08:00"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(parse_time_of_day("22:30:15"), NaiveTime::from_hms_opt(22, 30, 15));
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day(""), None);
    }
}
