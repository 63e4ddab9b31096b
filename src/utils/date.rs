//! Publication timestamps.
//!
//! The content API is loose about the type of `timestamp`: RFC 3339 strings,
//! plain `YYYY-MM-DD` dates and epoch milliseconds all occur. Display is
//! always `Month D, YYYY`; anything unparseable is shown as given.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Raw `timestamp` field of an article.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    Text(String),
}

impl Timestamp {
    /// Interpret as a UTC instant, if possible.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Self::Text(text) => parse_text(text.trim()),
        }
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    text.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

/// Human-readable date, e.g. `March 7, 2024`.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    match (timestamp.to_datetime(), timestamp) {
        (Some(dt), _) => dt.format("%B %-d, %Y").to_string(),
        (None, Timestamp::Text(text)) => text.clone(),
        (None, Timestamp::Millis(ms)) => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339() {
        let ts = Timestamp::Text("2024-03-07T15:04:05.000Z".into());
        assert_eq!(format_timestamp(&ts), "March 7, 2024");
    }

    #[test]
    fn test_rfc3339_offset_converted_to_utc() {
        let ts = Timestamp::Text("2024-03-07T23:30:00-02:00".into());
        assert_eq!(format_timestamp(&ts), "March 8, 2024");
    }

    #[test]
    fn test_plain_date() {
        let ts = Timestamp::Text("2023-12-25".into());
        assert_eq!(format_timestamp(&ts), "December 25, 2023");
    }

    #[test]
    fn test_epoch_millis() {
        // 2021-01-01T00:00:00Z
        let ts = Timestamp::Millis(1_609_459_200_000);
        assert_eq!(format_timestamp(&ts), "January 1, 2021");
    }

    #[test]
    fn test_millis_in_string() {
        let ts = Timestamp::Text("1609459200000".into());
        assert_eq!(format_timestamp(&ts), "January 1, 2021");
    }

    #[test]
    fn test_unparseable_kept_verbatim() {
        let ts = Timestamp::Text("last tuesday".into());
        assert_eq!(format_timestamp(&ts), "last tuesday");
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let n: Timestamp = serde_json::from_str("1609459200000").unwrap();
        assert_eq!(n, Timestamp::Millis(1_609_459_200_000));
        let s: Timestamp = serde_json::from_str("\"2024-01-01\"").unwrap();
        assert_eq!(s, Timestamp::Text("2024-01-01".into()));
    }
}
