//! Lenient decoding for backend timestamps.
//!
//! The backend emits RFC 3339 strings for most columns but echoes naive
//! `YYYY-MM-DDTHH:MM:SS[.ffffff]` values for datetimes it received without an
//! offset. Naive values are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an RFC 3339 or offset-less ISO 8601 timestamp.
///
/// # Examples
/// ```
/// use client::domain::timestamp::parse;
///
/// let aware = parse("2025-06-01T18:00:00Z").expect("rfc3339");
/// let naive = parse("2025-06-01T18:00:00").expect("naive");
/// assert_eq!(aware, naive);
/// ```
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` helper for required timestamps.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// `deserialize_with` helper for optional timestamps; `null` stays `None`.
pub(crate) fn lenient_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
        })
        .transpose()
}
