use crate::error::{AppResult, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Title used when the API delivers an event without a usable name
pub const DEFAULT_EVENT_TITLE: &str = "Event";

/// Raw event record from the employee-events endpoint.
///
/// The wire contract is loose: every field is optional and the upstream mixes
/// `el_*` names with camelCase spellings depending on the endpoint revision.
/// `el_origin_todate` serves as the fallback for both missing start and
/// missing end dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventRecord {
    #[serde(rename = "el_fromdate", alias = "fromDate")]
    pub from_date: Option<String>,
    #[serde(rename = "el_todate", alias = "toDate")]
    pub to_date: Option<String>,
    #[serde(rename = "el_origin_todate", alias = "originToDate")]
    pub origin_to_date: Option<String>,
    #[serde(rename = "el_name", alias = "eventName")]
    pub event_name: Option<String>,
    #[serde(rename = "tag_color", alias = "tagColor")]
    pub tag_color: Option<String>,
    #[serde(rename = "el_time_from", alias = "fromTime")]
    pub from_time: Option<String>,
    #[serde(rename = "el_time_to", alias = "toTime")]
    pub to_time: Option<String>,
}

/// A single calendar entry ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub color: Option<String>,
    pub time: Option<String>,
}

impl CalendarEvent {
    /// Shape a raw record for display. Dates are handled separately by the
    /// mapper; this only derives the title, color and time label.
    pub fn from_record(record: &RawEventRecord) -> Self {
        let title = match record.event_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => DEFAULT_EVENT_TITLE.to_string(),
        };

        Self {
            title,
            color: record.tag_color.clone(),
            time: join_time(record.from_time.as_deref(), record.to_time.as_deref()),
        }
    }
}

/// Join the time-of-day labels with " - ", dropping the missing side.
/// Blank labels count as missing.
fn join_time(from: Option<&str>, to: Option<&str>) -> Option<String> {
    fn present(label: Option<&str>) -> Option<&str> {
        label.filter(|l| !l.trim().is_empty())
    }

    match (present(from), present(to)) {
        (Some(from), Some(to)) => Some(format!("{} - {}", from, to)),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

/// A record the validation boundary rejected
#[derive(Debug, Clone, Error)]
#[error("record {index} rejected: {reason}")]
pub struct ValidationError {
    pub index: usize,
    pub reason: String,
}

/// Validate the employee-events payload at the system boundary.
///
/// Accepts either a bare JSON array or an object with a `data` array (both
/// shapes are observed upstream). Each element is validated on its own, so
/// one malformed record never fails the batch.
pub fn parse_records(payload: &Value) -> AppResult<Vec<Result<RawEventRecord, ValidationError>>> {
    let items = payload
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| payload.as_array())
        .ok_or_else(|| Error::Validation("expected an array of event records".to_string()))?;

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RawEventRecord>(item.clone()).map_err(|e| ValidationError {
                index,
                reason: e.to_string(),
            })
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_title_defaults() {
        let record = RawEventRecord {
            event_name: Some("Team Meeting".to_string()),
            ..Default::default()
        };
        assert_eq!(CalendarEvent::from_record(&record).title, "Team Meeting");

        // Absent and blank names fall back to the default
        let record = RawEventRecord::default();
        assert_eq!(CalendarEvent::from_record(&record).title, "Event");

        let record = RawEventRecord {
            event_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(CalendarEvent::from_record(&record).title, "Event");
    }

    #[test]
    fn test_time_label_join() {
        let record = RawEventRecord {
            from_time: Some("10:00 AM".to_string()),
            to_time: Some("11:30 AM".to_string()),
            ..Default::default()
        };
        assert_eq!(
            CalendarEvent::from_record(&record).time,
            Some("10:00 AM - 11:30 AM".to_string())
        );

        // One side missing keeps the other without the separator
        let record = RawEventRecord {
            from_time: Some("10:00 AM".to_string()),
            ..Default::default()
        };
        assert_eq!(
            CalendarEvent::from_record(&record).time,
            Some("10:00 AM".to_string())
        );

        let record = RawEventRecord {
            to_time: Some("5:00 PM".to_string()),
            ..Default::default()
        };
        assert_eq!(
            CalendarEvent::from_record(&record).time,
            Some("5:00 PM".to_string())
        );

        // Neither side present, or only blanks
        let record = RawEventRecord::default();
        assert_eq!(CalendarEvent::from_record(&record).time, None);

        let record = RawEventRecord {
            from_time: Some("".to_string()),
            to_time: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(CalendarEvent::from_record(&record).time, None);
    }

    #[test]
    fn test_color_passthrough() {
        let record = RawEventRecord {
            tag_color: Some("#e76f51".to_string()),
            ..Default::default()
        };
        assert_eq!(
            CalendarEvent::from_record(&record).color,
            Some("#e76f51".to_string())
        );

        let record = RawEventRecord::default();
        assert_eq!(CalendarEvent::from_record(&record).color, None);
    }

    #[test]
    fn test_parse_records_accepts_both_payload_shapes() {
        let bare = json!([{"el_fromdate": "2025-08-08", "el_name": "Holiday"}]);
        let parsed = parse_records(&bare).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[0].as_ref().unwrap().from_date,
            Some("2025-08-08".to_string())
        );

        let wrapped = json!({"data": [{"fromDate": "2025-08-08", "eventName": "Holiday"}]});
        let parsed = parse_records(&wrapped).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[0].as_ref().unwrap().event_name,
            Some("Holiday".to_string())
        );
    }

    #[test]
    fn test_parse_records_rejects_per_record() {
        // The string element is rejected, the object still parses
        let payload = json!([
            "not a record",
            {"el_fromdate": "2025-08-08"}
        ]);
        let parsed = parse_records(&payload).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].is_err());
        assert_eq!(parsed[0].as_ref().unwrap_err().index, 0);
        assert!(parsed[1].is_ok());
    }

    #[test]
    fn test_parse_records_rejects_non_array_payload() {
        assert!(parse_records(&json!({"status": "ok"})).is_err());
        assert!(parse_records(&json!("nope")).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let payload = json!([{
            "el_fromdate": "2025-08-08",
            "el_leave_type": "VL",
            "approver": {"id": 7}
        }]);
        let parsed = parse_records(&payload).unwrap();
        assert!(parsed[0].is_ok());
    }
}
