//! Deserializers for query strings where browsers send empty values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_bound<'de, D>(
    deserializer: D,
    parse: fn(&str) -> Option<DateTime<Utc>>,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse(s.trim())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date or timestamp: {s}"))),
        None => Ok(None),
    }
}

/// Lower bound: an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date read as
/// midnight UTC. Empty strings are treated as absent.
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_bound(deserializer, parse_datetime)
}

/// Inclusive upper bound: a bare date covers the whole day, so it is read as
/// the last nanosecond of that day in UTC.
pub fn deserialize_optional_end_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_bound(deserializer, parse_end_datetime)
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn parse_end_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_nano_opt(23, 59, 59, 999_999_999))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_datetime")]
        from: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "deserialize_optional_end_datetime")]
        to: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        limit: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        student_id: Option<Uuid>,
    }

    #[test]
    fn parses_plain_dates_as_midnight_utc() {
        let q: Query = serde_json::from_str(r#"{"from": "2024-03-01"}"#).unwrap();
        assert_eq!(q.from, Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn plain_upper_bound_covers_the_whole_day() {
        let q: Query = serde_json::from_str(r#"{"to": "2024-09-30"}"#).unwrap();
        let to = q.to.unwrap();
        assert!(to > Utc.with_ymd_and_hms(2024, 9, 30, 23, 59, 59).unwrap());
        assert!(to < Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn timestamp_upper_bound_is_kept_exact() {
        let q: Query = serde_json::from_str(r#"{"to": "2024-09-30T09:00:00Z"}"#).unwrap();
        assert_eq!(q.to, Some(Utc.with_ymd_and_hms(2024, 9, 30, 9, 0, 0).unwrap()));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let q: Query = serde_json::from_str(r#"{"from": "2024-03-01T10:00:00+02:00"}"#).unwrap();
        assert_eq!(q.from, Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()));
    }

    #[test]
    fn empty_strings_are_none() {
        let q: Query =
            serde_json::from_str(r#"{"from": "", "limit": "", "student_id": ""}"#).unwrap();
        assert!(q.from.is_none());
        assert!(q.limit.is_none());
        assert!(q.student_id.is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Query>(r#"{"from": "yesterday"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"to": "2024-02-30"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"limit": "ten"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"student_id": "abc"}"#).is_err());
    }
}
