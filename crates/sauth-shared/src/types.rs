//! Common types

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Record identifiers are opaque strings so that ids written by other tools
/// into the record store stay usable.
pub type EntityId = String;

pub fn new_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Current time truncated to whole seconds, the precision the flat-file store keeps.
pub fn now_seconds() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Serde adapter for timestamps in the flat-file store (`%Y-%m-%dT%H:%M:%S`, UTC).
pub mod store_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::constants::STORE_TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(&value.format(STORE_TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, STORE_TIMESTAMP_FORMAT) {
            return Ok(naive.and_utc());
        }
        // Accept RFC 3339 as well, e.g. records written with fractional seconds.
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "store_timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_store_timestamp_format() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T10:20:30Z").unwrap().with_timezone(&Utc);
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-03-01T10:20:30"}"#);

        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }

    #[test]
    fn test_store_timestamp_accepts_rfc3339() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2024-03-01T10:20:30.250+00:00"}"#).unwrap();
        assert_eq!(parsed.at.timestamp(), 1709288430);
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(new_id(), new_id());
        assert_eq!(now_seconds().timestamp_subsec_nanos(), 0);
    }
}
