//! Plain-text digests over the per-day event index.
//!
//! Pure formatting: the watch scheduler decides when to print, these decide
//! what. Empty days and empty weeks yield no digest at all.

use super::mapper::{normalize_date, EventsByDate, DATE_KEY_FORMAT};
use super::models::{CalendarEvent, RawEventRecord};
use chrono::NaiveDate;

/// Format the digest for a single day, or `None` when the day has no events
pub fn format_daily_digest(map: &EventsByDate, date: NaiveDate) -> Option<String> {
    let key = date.format(DATE_KEY_FORMAT).to_string();
    let events = map.get(&key)?;
    if events.is_empty() {
        return None;
    }

    let mut message = format!("Today's events ({}):\n", key);
    for event in events {
        message.push_str(&event_line(event));
    }

    Some(message)
}

/// Format the digest for the 7-day window starting at `week_start`, or
/// `None` when the whole window is empty
pub fn format_weekly_digest(map: &EventsByDate, week_start: NaiveDate) -> Option<String> {
    let mut message = String::from("Events this week:\n");
    let mut any = false;

    let mut day = week_start;
    for _ in 0..7 {
        let key = day.format(DATE_KEY_FORMAT).to_string();
        if let Some(events) = map.get(&key) {
            if !events.is_empty() {
                any = true;
                message.push_str(&format!("\n{} {}:\n", day.format("%A"), key));
                for event in events {
                    message.push_str(&event_line(event));
                }
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    if any {
        Some(message)
    } else {
        None
    }
}

/// Format a summary of newly published events, or `None` when there are none
pub fn format_new_events(records: &[RawEventRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut message = String::from("Newly published events:\n");
    for record in records {
        let event = CalendarEvent::from_record(record);
        let start = normalize_date(
            record
                .from_date
                .as_deref()
                .or(record.origin_to_date.as_deref()),
        );

        let line = match (start, &event.time) {
            (Some(date), Some(time)) => format!("  - {} on {} ({})\n", event.title, date, time),
            (Some(date), None) => format!("  - {} on {}\n", event.title, date),
            (None, _) => format!("  - {} (date unknown)\n", event.title),
        };
        message.push_str(&line);
    }

    Some(message)
}

fn event_line(event: &CalendarEvent) -> String {
    match &event.time {
        Some(time) => format!("  - {} ({})\n", event.title, time),
        None => format!("  - {}\n", event.title),
    }
}
