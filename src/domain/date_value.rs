//! Stored date values and their normalisation to a plain date-time.
//!
//! Records written by different clients carry dates in several shapes: a
//! calendar date, a local date-time, an RFC 3339 string, or the store's own
//! `{seconds, nanoseconds}` timestamp wrapper. Everything downstream works on
//! the local wall-clock `NaiveDateTime` returned by [`resolve_date`], the same
//! frame as `Clock::local_now`. Instants (timestamps, RFC 3339 strings) are
//! shifted into the local zone; plain dates and date-times are taken as written.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Timestamp wrapper emitted by the document store (seconds since the epoch, UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(default, alias = "_nanoseconds")]
    pub nanoseconds: u32,
}

impl StoreTimestamp {
    /// Reads `value` as local wall-clock time. Falls back to UTC for a
    /// local time skipped by a DST change.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let utc = Local
            .from_local_datetime(&value)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| value.and_utc());
        Self {
            seconds: utc.timestamp(),
            nanoseconds: utc.timestamp_subsec_nanos(),
        }
    }

    /// Local wall-clock date-time, or `None` when out of range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds).map(to_local)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Timestamp(StoreTimestamp),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Text(String),
}

const TEXT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

impl DateValue {
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        match self {
            DateValue::Timestamp(stamp) => stamp.to_naive(),
            DateValue::DateTime(value) => Some(*value),
            DateValue::Date(date) => Some(date.and_time(NaiveTime::MIN)),
            DateValue::Text(text) => parse_text(text),
        }
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(value: NaiveDateTime) -> Self {
        DateValue::DateTime(value)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(value: NaiveDate) -> Self {
        DateValue::Date(value)
    }
}

impl From<StoreTimestamp> for DateValue {
    fn from(value: StoreTimestamp) -> Self {
        DateValue::Timestamp(value)
    }
}

fn to_local<Tz: TimeZone>(instant: DateTime<Tz>) -> NaiveDateTime {
    instant.with_timezone(&Local).naive_local()
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(to_local(value));
    }
    if let Ok(value) = text.parse::<NaiveDateTime>() {
        return Some(value);
    }
    if let Ok(date) = text.parse::<NaiveDate>() {
        return Some(date.and_time(NaiveTime::MIN));
    }
    TEXT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Normalises an optional stored date. `None` means "unavailable": the record
/// is left out of any date-bounded computation.
pub fn resolve_date(value: Option<&DateValue>) -> Option<NaiveDateTime> {
    value.and_then(DateValue::to_naive)
}

/// Reads an optional date field without failing the surrounding record.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<DateValue>(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => {
            tracing::warn!(%value, "unreadable date value ignored");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn local(seconds: i64) -> NaiveDateTime {
        DateTime::from_timestamp(seconds, 0)
            .unwrap()
            .with_timezone(&Local)
            .naive_local()
    }

    #[test]
    fn resolves_every_stored_shape() {
        let cases = [
            (json!("2025-03-04"), at(2025, 3, 4, 0, 0)),
            (json!("2025-03-04T09:30:00"), at(2025, 3, 4, 9, 30)),
            (json!("2025-03-04T09:30"), at(2025, 3, 4, 9, 30)),
            (json!("2025-03-04T09:30:00+05:30"), local(1_741_060_800)),
            (json!("2025-03-04T04:00:00Z"), local(1_741_060_800)),
            (json!({"seconds": 1_741_080_600, "nanoseconds": 0}), local(1_741_080_600)),
            (json!({"_seconds": 1_741_080_600}), local(1_741_080_600)),
        ];
        for (raw, expected) in cases {
            let value: DateValue = serde_json::from_value(raw.clone()).expect("parse");
            assert_eq!(resolve_date(Some(&value)), Some(expected), "input {raw}");
        }
    }

    #[test]
    fn missing_or_garbled_values_are_unavailable() {
        assert_eq!(resolve_date(None), None);
        let garbled = DateValue::Text("next tuesday".into());
        assert_eq!(resolve_date(Some(&garbled)), None);
    }

    #[test]
    fn store_timestamp_round_trips_naive_values() {
        let value = at(2024, 12, 31, 23, 59);
        assert_eq!(StoreTimestamp::from_naive(value).to_naive(), Some(value));
    }
}
