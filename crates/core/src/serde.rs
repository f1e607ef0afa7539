//! Serde helper functions for source record timestamps.
//!
//! Source systems emit transaction timestamps as `YYYY-MM-DD HH:MM:SS`.
//! ISO 8601 with a `T` separator is accepted as well, and values carrying an
//! explicit UTC offset are converted to UTC before the offset is dropped.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format used when writing timestamps back out.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a source timestamp into a naive wall-clock value.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).naive_utc())
        })
}

/// Deserialize a source timestamp.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
}

/// Serialize a timestamp in the source format.
pub fn serialize_timestamp<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Serialize;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct TestStruct {
        #[serde(
            deserialize_with = "deserialize_timestamp",
            serialize_with = "serialize_timestamp"
        )]
        at: NaiveDateTime,
    }

    fn expected(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 10, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_space_separated_timestamp() {
        let parsed: TestStruct = serde_json::from_str(r#"{"at": "2023-10-01 10:00:00"}"#).unwrap();
        assert_eq!(parsed.at, expected(10));
    }

    #[test]
    fn test_iso_timestamp() {
        let parsed: TestStruct = serde_json::from_str(r#"{"at": "2023-10-01T10:00:00"}"#).unwrap();
        assert_eq!(parsed.at, expected(10));
    }

    #[test]
    fn test_offset_timestamp_is_converted_to_utc() {
        let parsed: TestStruct =
            serde_json::from_str(r#"{"at": "2023-10-01T12:00:00+02:00"}"#).unwrap();
        assert_eq!(parsed.at, expected(10));
    }

    #[test]
    fn test_invalid_timestamp() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_source_format() {
        let value = TestStruct { at: expected(10) };
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"at":"2023-10-01 10:00:00"}"#
        );
    }
}
