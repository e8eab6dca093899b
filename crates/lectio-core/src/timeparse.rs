//! Timestamp parsing shared by the allocator, pattern detection and
//! schedule optimization.
//!
//! Callers hand the engine ISO-8601-like strings. Accepted forms, in order:
//! RFC 3339 (a trailing `Z` is normalized to `+00:00` first), naive ISO
//! with seconds, then the legacy fallbacks `%Y-%m-%d %H:%M` and
//! `%Y-%m-%dT%H:%M`. Anything else is treated as a malformed record and
//! skipped by the caller.

use chrono::{DateTime, NaiveDateTime, Timelike};

/// Normalized format used when the engine emits timestamps.
pub(crate) const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a caller-supplied timestamp string.
///
/// Offset-bearing inputs keep their wall-clock reading (the offset is
/// dropped, not applied), so mixed aware/naive inputs stay comparable.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if let Some(stripped) = trimmed.strip_suffix('Z') {
        format!("{stripped}+00:00")
    } else {
        trimmed.to_string()
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }

    if let Ok(dt) = trimmed.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    None
}

/// Hour-of-day (0-23) of a timestamp string, if parsable.
pub(crate) fn hour_of(raw: &str) -> Option<u32> {
    parse_timestamp(raw).map(|dt| dt.time().hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_rfc3339_with_zulu_suffix() {
        let dt = parse_timestamp("2026-03-01T09:30:00Z").unwrap();
        assert_eq!(dt.time().hour(), 9);
        assert_eq!(dt.time().minute(), 30);
    }

    #[test]
    fn parses_naive_iso_with_seconds() {
        let dt = parse_timestamp("2026-03-01T09:30:00").unwrap();
        assert_eq!(
            dt.date(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn parses_fallback_formats() {
        assert!(parse_timestamp("2026-03-01 09:30").is_some());
        assert!(parse_timestamp("2026-03-01T09:30").is_some());
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("tomorrow morning").is_none());
        assert!(parse_timestamp("2026-13-40T09:30").is_none());
    }

    #[test]
    fn hour_of_extracts_hour() {
        assert_eq!(hour_of("2026-03-01 22:15"), Some(22));
        assert_eq!(hour_of("not a time"), None);
    }

    #[test]
    fn offset_keeps_wall_clock_reading() {
        // 09:00 written with a -03:00 offset still reads as hour 9.
        assert_eq!(hour_of("2026-03-01T09:00:00-03:00"), Some(9));
    }
}
