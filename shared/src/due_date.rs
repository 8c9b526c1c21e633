//! Parsing for the `dueDate` field.
//!
//! Accepted inputs: an RFC 3339 timestamp, a plain `YYYY-MM-DD` date
//! (midnight UTC), or an integer number of milliseconds since the Unix epoch.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn parse(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_str(text),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

pub fn parse_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

/// `deserialize_with` helper for optional due dates in edit payloads.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid dueDate: {value}"))),
    }
}
