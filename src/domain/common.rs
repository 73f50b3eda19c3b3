//! Shared traits, the amount type, and tolerant readers for stored values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::FleetError;

/// Monetary amount in whole currency units.
pub type Amount = i64;

/// Opaque record identifier.
///
/// Ids minted here are UUID v4 text, but stored documents may carry any
/// string the backing store generated. Ids are only compared, never parsed.
/// The default value is the empty id, which matches no record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FleetError::invalid("record id cannot be empty"));
        }
        Ok(Self(value.to_string()))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Strings and integers are taken as-is; any other shape reads as the empty id.
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(text) => Self(text),
            Value::Number(number) => Self(number.to_string()),
            other => {
                tracing::warn!(value = %other, "unreadable record id treated as empty");
                Self::default()
            }
        })
    }
}

/// Exposes a stable identifier for stored entities.
pub trait Identifiable {
    fn id(&self) -> &RecordId;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Interprets a loosely typed stored value as a whole-unit amount.
///
/// Integers pass through, fractional numbers round to the nearest unit and
/// numeric strings are parsed. Anything else yields `None`.
pub fn amount_from_value(value: &Value) -> Option<Amount> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(round_units)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<Amount>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(round_units)
            })
        }
        _ => None,
    }
}

fn round_units(value: f64) -> Amount {
    value.round() as Amount
}

/// Reads a required amount; malformed input reads as zero.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value).unwrap_or_else(|| {
        tracing::warn!(%value, "malformed amount treated as 0");
        0
    }))
}

/// Reads an optional amount. `null` stays absent; malformed input reads as zero.
pub fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(amount_from_value(&value).unwrap_or_else(|| {
        tracing::warn!(%value, "malformed amount treated as 0");
        0
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_numbers_and_numeric_strings() {
        assert_eq!(amount_from_value(&json!(1500)), Some(1500));
        assert_eq!(amount_from_value(&json!(99.6)), Some(100));
        assert_eq!(amount_from_value(&json!(" 250 ")), Some(250));
        assert_eq!(amount_from_value(&json!("12.4")), Some(12));
    }

    #[test]
    fn record_ids_accept_store_generated_keys() {
        let id: RecordId = serde_json::from_value(json!("Xk2pQ9fireStoreId")).unwrap();
        assert_eq!(id.as_str(), "Xk2pQ9fireStoreId");
        let numeric: RecordId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(numeric.as_str(), "42");
        let broken: RecordId = serde_json::from_value(json!({"nested": true})).unwrap();
        assert!(broken.is_empty());
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("Xk2pQ9fireStoreId"));
        assert!(" ".parse::<RecordId>().is_err());
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(amount_from_value(&json!("abc")), None);
        assert_eq!(amount_from_value(&json!(true)), None);
        assert_eq!(amount_from_value(&json!({"value": 1})), None);
        assert_eq!(amount_from_value(&Value::Null), None);
    }
}
