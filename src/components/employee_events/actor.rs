use super::mapper::{normalize_date, DATE_KEY_FORMAT};
use super::models::{parse_records, RawEventRecord, DEFAULT_EVENT_TITLE};
use crate::api::HrApiClient;
use crate::error::{hr_api_error, AppResult};
use chrono::{Duration, Utc};
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Days of lookahead used when polling for newly published events
const POLL_WINDOW_DAYS: i64 = 28;

/// The employee events actor that processes messages
pub struct EmployeeEventsActor {
    api: HrApiClient,
    command_rx: mpsc::Receiver<EmployeeEventsCommand>,
    /// Events already reported by the polling loop, keyed by start date and title
    seen: HashSet<String>,
    /// Whether the first poll has baselined the seen set
    primed: bool,
}

/// Commands that can be sent to the employee events actor
pub enum EmployeeEventsCommand {
    GetEvents {
        from: String,
        to: String,
        response_tx: mpsc::Sender<AppResult<Vec<RawEventRecord>>>,
    },
    CheckNewEvents(mpsc::Sender<AppResult<Vec<RawEventRecord>>>),
    Shutdown,
}

/// Handle for communicating with the employee events actor
#[derive(Clone)]
pub struct EmployeeEventsActorHandle {
    command_tx: mpsc::Sender<EmployeeEventsCommand>,
}

impl EmployeeEventsActorHandle {
    /// Get the employee's events within a date range (canonical date strings)
    pub async fn get_events(&self, from: String, to: String) -> AppResult<Vec<RawEventRecord>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(EmployeeEventsCommand::GetEvents {
                from,
                to,
                response_tx,
            })
            .await
            .map_err(|e| hr_api_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| hr_api_error("Response channel closed"))?
    }

    /// Check for events published since the last check
    pub async fn check_new_events(&self) -> AppResult<Vec<RawEventRecord>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(EmployeeEventsCommand::CheckNewEvents(response_tx))
            .await
            .map_err(|e| hr_api_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| hr_api_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(EmployeeEventsCommand::Shutdown).await;
        Ok(())
    }
}

impl EmployeeEventsActor {
    /// Create a new actor and return its handle
    pub fn new(api: HrApiClient) -> (Self, EmployeeEventsActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            api,
            command_rx,
            seen: HashSet::new(),
            primed: false,
        };

        let handle = EmployeeEventsActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Employee events actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                EmployeeEventsCommand::GetEvents {
                    from,
                    to,
                    response_tx,
                } => {
                    let result = Self::get_events(&self.api, &from, &to).await;
                    let _ = response_tx.send(result).await;
                }
                EmployeeEventsCommand::CheckNewEvents(response_tx) => {
                    let result = self.check_new_events().await;
                    let _ = response_tx.send(result).await;
                }
                EmployeeEventsCommand::Shutdown => {
                    info!("Employee events actor shutting down");
                    break;
                }
            }
        }

        info!("Employee events actor shut down");
    }

    /// Fetch events from the HR API and run them through the validation
    /// boundary. Malformed records are logged and dropped; the batch always
    /// succeeds once the transport does.
    pub async fn get_events(
        api: &HrApiClient,
        from: &str,
        to: &str,
    ) -> AppResult<Vec<RawEventRecord>> {
        let payload = api
            .get_json(
                "employee/events",
                &[("from", from.to_string()), ("to", to.to_string())],
            )
            .await?;

        let mut records = Vec::new();
        for result in parse_records(&payload)? {
            match result {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping malformed event record: {}", e),
            }
        }

        Ok(records)
    }

    /// Check for events not seen by a previous poll.
    ///
    /// The first poll only baselines the seen set, so a fresh watch session
    /// does not replay the whole calendar as "new".
    async fn check_new_events(&mut self) -> AppResult<Vec<RawEventRecord>> {
        let now = Utc::now().date_naive();
        let from = now.format(DATE_KEY_FORMAT).to_string();
        let to = (now + Duration::days(POLL_WINDOW_DAYS))
            .format(DATE_KEY_FORMAT)
            .to_string();

        let current = Self::get_events(&self.api, &from, &to).await?;

        let mut new_records = Vec::new();
        for record in &current {
            if self.seen.insert(seen_key(record)) && self.primed {
                new_records.push(record.clone());
            }
        }
        self.primed = true;

        Ok(new_records)
    }
}

/// Composite identity for "have we reported this event yet": start date key
/// plus title. Good enough for a poll window; the upstream has no stable ids.
fn seen_key(record: &RawEventRecord) -> String {
    let start = normalize_date(
        record
            .from_date
            .as_deref()
            .or(record.origin_to_date.as_deref()),
    )
    .unwrap_or_default();
    let title = record.event_name.as_deref().unwrap_or(DEFAULT_EVENT_TITLE);
    format!("{}|{}", start, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seen_key_uses_start_and_title() {
        let record = RawEventRecord {
            from_date: Some("2025-08-08".to_string()),
            event_name: Some("Team Meeting".to_string()),
            ..Default::default()
        };
        assert_eq!(seen_key(&record), "2025-08-08|Team Meeting");

        // The origin fallback feeds the key the same way it feeds the mapper
        let record = RawEventRecord {
            origin_to_date: Some("08/09/2025".to_string()),
            ..Default::default()
        };
        assert_eq!(seen_key(&record), "2025-08-09|Event");

        // Unparseable start still yields a stable key
        let record = RawEventRecord {
            from_date: Some("garbage".to_string()),
            event_name: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(seen_key(&record), "|X");
    }
}
