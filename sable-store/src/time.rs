use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Current unix timestamp with sub-second precision.
pub fn now_secs_f64() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |duration| duration.as_secs_f64())
}

/// Current UTC instant as an ISO-8601 string, the format every store writes.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a stored timestamp leniently.
///
/// Strict RFC 3339 is tried first. Historical store files also contain
/// stamps with non-zero-padded date components and stamps with no UTC
/// offset at all; those are accepted too, with missing offsets read as UTC.
/// Returns `None` only when nothing recognizable remains.
pub fn parse_timestamp_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Offset present, but components not zero-padded.
    for format in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    // No offset; assume UTC.
    let naive = value.strip_suffix('Z').unwrap_or(value);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_strict_rfc3339() {
        let parsed = parse_timestamp_lenient("2024-05-07T13:00:00+00:00").unwrap();
        assert_eq!(parsed.hour(), 13);

        let zulu = parse_timestamp_lenient("2024-05-07T13:00:00Z").unwrap();
        assert_eq!(parsed, zulu);
    }

    #[test]
    fn parses_non_zero_padded_components() {
        let parsed = parse_timestamp_lenient("2024-5-7T3:04:05").unwrap();
        assert_eq!(parsed.month(), 5);
        assert_eq!(parsed.day(), 7);
        assert_eq!(parsed.hour(), 3);
    }

    #[test]
    fn missing_offset_is_read_as_utc() {
        let parsed = parse_timestamp_lenient("2024-05-07T13:00:00").unwrap();
        let explicit = parse_timestamp_lenient("2024-05-07T13:00:00+00:00").unwrap();
        assert_eq!(parsed, explicit);
    }

    #[test]
    fn accepts_space_separator_and_fractions() {
        let parsed = parse_timestamp_lenient("2024-05-07 13:00:00.123456").unwrap();
        assert_eq!(parsed.hour(), 13);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp_lenient("").is_none());
        assert!(parse_timestamp_lenient("last tuesday").is_none());
        assert!(parse_timestamp_lenient("2024-13-40T99:00:00").is_none());
    }
}
