//! Per-day event index for the calendar views.
//!
//! The employee-events endpoint delivers dates in more than one format and
//! multi-day events as a single record. Calendar rendering wants one lookup
//! per day cell, so this module normalizes every date to a canonical
//! `YYYY-MM-DD` key and replicates each record onto every day it spans.
//! Malformed input is dropped or collapsed, never reported: the calendar
//! must render with whatever survives.

use super::models::{CalendarEvent, RawEventRecord};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Canonical date key format shared by the mapper and the digests
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Per-day event index: canonical date key to the events on that day,
/// in input order
pub type EventsByDate = BTreeMap<String, Vec<CalendarEvent>>;

/// Date-only formats tried when the input is neither canonical nor a
/// strict MM/DD/YYYY
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Datetime formats without an offset
const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Normalize a date-like string to the canonical `YYYY-MM-DD` key.
///
/// Returns `None` for absent, blank, or unparseable input; never fails
/// louder than that.
pub fn normalize_date(input: Option<&str>) -> Option<String> {
    let raw = input?.trim();
    if raw.is_empty() {
        return None;
    }

    // Already canonical; kept as-is when it names a real date
    if is_canonical_shape(raw) && NaiveDate::parse_from_str(raw, DATE_KEY_FORMAT).is_ok() {
        return Some(raw.to_string());
    }

    // MM/DD/YYYY, reassembled with zero padding
    if is_slash_shape(raw) {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
            return Some(date.format(DATE_KEY_FORMAT).to_string());
        }
    }

    parse_fallback(raw).map(|date| date.format(DATE_KEY_FORMAT).to_string())
}

/// Expand a date range into one canonical key per spanned day, inclusive.
///
/// A missing, unparseable, or backwards end collapses the range to the start
/// day. Stepping is per calendar day, so the walk stays correct across DST
/// transitions.
pub fn expand_range(start_key: &str, end_key: Option<&str>) -> Vec<String> {
    let Ok(start) = NaiveDate::parse_from_str(start_key, DATE_KEY_FORMAT) else {
        return vec![start_key.to_string()];
    };

    let end = end_key.and_then(|key| NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok());
    let Some(end) = end else {
        return vec![start_key.to_string()];
    };

    if end < start {
        return vec![start_key.to_string()];
    }

    let mut keys = Vec::new();
    let mut day = start;
    while day <= end {
        keys.push(day.format(DATE_KEY_FORMAT).to_string());
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }

    keys
}

/// Build the per-day event index from validated raw records.
///
/// Records without a parseable start date contribute nothing. The map is
/// rebuilt from scratch on every call; events on the same day keep input
/// order and are not deduplicated.
pub fn build_event_map(records: &[RawEventRecord]) -> EventsByDate {
    let mut map = EventsByDate::new();

    for record in records {
        // The alternate end-date field doubles as the start fallback
        let start_key = normalize_date(
            record
                .from_date
                .as_deref()
                .or(record.origin_to_date.as_deref()),
        );
        let Some(start_key) = start_key else {
            continue;
        };

        let end_key = normalize_date(
            record
                .to_date
                .as_deref()
                .or(record.origin_to_date.as_deref())
                .or(record.from_date.as_deref()),
        );

        let event = CalendarEvent::from_record(record);
        for key in expand_range(&start_key, end_key.as_deref()) {
            map.entry(key).or_default().push(event.clone());
        }
    }

    map
}

/// 4 digits, `-`, 2 digits, `-`, 2 digits
fn is_canonical_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// 2 digits, `/`, 2 digits, `/`, 4 digits
fn is_slash_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// Generic parsing for everything else the upstream has been seen to emit.
/// Timestamps carrying an offset are mapped to the local calendar date.
fn parse_fallback(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    for format in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    for format in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: Option<&str>, to: Option<&str>, name: Option<&str>) -> RawEventRecord {
        RawEventRecord {
            from_date: from.map(String::from),
            to_date: to.map(String::from),
            event_name: name.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_canonical_is_unchanged() {
        assert_eq!(
            normalize_date(Some("2025-03-05")),
            Some("2025-03-05".to_string())
        );
        assert_eq!(
            normalize_date(Some("2025-12-31")),
            Some("2025-12-31".to_string())
        );
    }

    #[test]
    fn test_normalize_slash_format() {
        assert_eq!(
            normalize_date(Some("03/05/2025")),
            Some("2025-03-05".to_string())
        );
        assert_eq!(
            normalize_date(Some("12/31/2025")),
            Some("2025-12-31".to_string())
        );
    }

    #[test]
    fn test_normalize_invalid_yields_none() {
        assert_eq!(normalize_date(Some("not-a-date")), None);
        assert_eq!(normalize_date(None), None);
        assert_eq!(normalize_date(Some("")), None);
        assert_eq!(normalize_date(Some("   ")), None);
        // Canonical shape but not a real calendar date
        assert_eq!(normalize_date(Some("2025-02-31")), None);
        assert_eq!(normalize_date(Some("2025-13-01")), None);
        // Slash shape with an impossible month
        assert_eq!(normalize_date(Some("13/05/2025")), None);
    }

    #[test]
    fn test_normalize_fallback_formats() {
        // Unpadded variants
        assert_eq!(
            normalize_date(Some("2025-3-5")),
            Some("2025-03-05".to_string())
        );
        assert_eq!(
            normalize_date(Some("3/5/2025")),
            Some("2025-03-05".to_string())
        );
        // Naive datetimes
        assert_eq!(
            normalize_date(Some("2025-03-05T14:30:00")),
            Some("2025-03-05".to_string())
        );
        assert_eq!(
            normalize_date(Some("2025-03-05 14:30:00")),
            Some("2025-03-05".to_string())
        );
        // Spelled-out month
        assert_eq!(
            normalize_date(Some("March 5, 2025")),
            Some("2025-03-05".to_string())
        );
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        assert_eq!(
            normalize_date(Some(" 2025-03-05 ")),
            Some("2025-03-05".to_string())
        );
    }

    #[test]
    fn test_expand_single_day() {
        assert_eq!(expand_range("2025-03-05", None), vec!["2025-03-05"]);
    }

    #[test]
    fn test_expand_multi_day_inclusive() {
        assert_eq!(
            expand_range("2025-03-05", Some("2025-03-07")),
            vec!["2025-03-05", "2025-03-06", "2025-03-07"]
        );
        // Same start and end is a single day
        assert_eq!(
            expand_range("2025-03-05", Some("2025-03-05")),
            vec!["2025-03-05"]
        );
    }

    #[test]
    fn test_expand_crosses_month_and_year_boundaries() {
        assert_eq!(
            expand_range("2025-01-30", Some("2025-02-02")),
            vec!["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]
        );
        assert_eq!(
            expand_range("2025-12-31", Some("2026-01-01")),
            vec!["2025-12-31", "2026-01-01"]
        );
    }

    #[test]
    fn test_expand_reversed_range_collapses() {
        assert_eq!(
            expand_range("2025-03-07", Some("2025-03-05")),
            vec!["2025-03-07"]
        );
    }

    #[test]
    fn test_expand_unparseable_end_collapses() {
        assert_eq!(
            expand_range("2025-03-05", Some("garbage")),
            vec!["2025-03-05"]
        );
    }

    #[test]
    fn test_map_single_event() {
        let records = vec![RawEventRecord {
            from_date: Some("2025-08-08".to_string()),
            to_date: Some("2025-08-08".to_string()),
            event_name: Some("Team Meeting".to_string()),
            tag_color: Some("#2a9d8f".to_string()),
            from_time: Some("10:00 AM".to_string()),
            ..Default::default()
        }];

        let map = build_event_map(&records);
        assert_eq!(map.len(), 1);

        let day = &map["2025-08-08"];
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "Team Meeting");
        assert_eq!(day[0].color, Some("#2a9d8f".to_string()));
        assert_eq!(day[0].time, Some("10:00 AM".to_string()));
    }

    #[test]
    fn test_map_multi_day_event_appears_on_every_day() {
        let records = vec![record(
            Some("2025-08-20"),
            Some("2025-08-22"),
            Some("Planning Offsite"),
        )];

        let map = build_event_map(&records);
        assert_eq!(map.len(), 3);
        for key in ["2025-08-20", "2025-08-21", "2025-08-22"] {
            assert_eq!(map[key], map["2025-08-20"], "mismatch on {}", key);
            assert_eq!(map[key][0].title, "Planning Offsite");
        }
    }

    #[test]
    fn test_map_drops_unparseable_start() {
        let records = vec![record(Some("garbage"), None, Some("X"))];
        assert!(build_event_map(&records).is_empty());
    }

    #[test]
    fn test_map_missing_end_is_single_day() {
        let records = vec![record(Some("2025-08-08"), None, Some("Payday"))];
        let map = build_event_map(&records);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("2025-08-08"));
    }

    #[test]
    fn test_map_reversed_range_is_single_day() {
        let records = vec![record(
            Some("2025-03-07"),
            Some("2025-03-05"),
            Some("Backwards"),
        )];
        let map = build_event_map(&records);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("2025-03-07"));
    }

    #[test]
    fn test_map_preserves_insertion_order_without_dedup() {
        let records = vec![
            record(Some("2025-08-08"), None, Some("First")),
            record(Some("2025-08-08"), None, Some("Second")),
            record(Some("2025-08-08"), None, Some("Second")),
        ];

        let map = build_event_map(&records);
        let day = &map["2025-08-08"];
        assert_eq!(day.len(), 3);
        assert_eq!(day[0].title, "First");
        assert_eq!(day[1].title, "Second");
        assert_eq!(day[2].title, "Second");
    }

    #[test]
    fn test_map_origin_todate_backs_both_chains() {
        // No from_date: the alternate field supplies the start
        let mut rec = RawEventRecord {
            origin_to_date: Some("2025-08-11".to_string()),
            event_name: Some("Origin Only".to_string()),
            ..Default::default()
        };
        let map = build_event_map(std::slice::from_ref(&rec));
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("2025-08-11"));

        // With a from_date, the alternate field supplies the end
        rec.from_date = Some("2025-08-10".to_string());
        let map = build_event_map(std::slice::from_ref(&rec));
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("2025-08-10"));
        assert!(map.contains_key("2025-08-11"));
    }

    #[test]
    fn test_map_mixed_date_formats_in_one_batch() {
        let records = vec![
            record(Some("08/08/2025"), Some("2025-08-09"), Some("Mixed")),
            record(Some("2025-08-09"), None, Some("Canonical")),
        ];

        let map = build_event_map(&records);
        assert_eq!(map.len(), 2);
        assert_eq!(map["2025-08-08"].len(), 1);
        // The multi-day record lands next to the canonical one
        assert_eq!(map["2025-08-09"].len(), 2);
        assert_eq!(map["2025-08-09"][0].title, "Mixed");
        assert_eq!(map["2025-08-09"][1].title, "Canonical");
    }
}
