/// Every entity id is a server-assigned UUID v4.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4()
}

/// Lenient timestamp deserialization for client-supplied dates.
///
/// Accepts, in order:
///
/// | Input                         | Interpretation        |
/// |-------------------------------|-----------------------|
/// | `2025-03-01T10:00:00+05:30`   | RFC 3339, any offset  |
/// | `2025-03-01T10:00:00.123456`  | naive date-time, UTC  |
/// | `2025-03-01`                  | midnight UTC          |
///
/// Use with `#[serde(deserialize_with = "flexible_timestamp::deserialize")]`.
pub mod flexible_timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    use super::Timestamp;

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    /// Parse a timestamp string, returning `None` if no accepted format matches.
    pub fn parse(raw: &str) -> Option<Timestamp> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}
