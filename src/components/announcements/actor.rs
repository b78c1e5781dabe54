use super::models::Announcement;
use crate::api::HrApiClient;
use crate::error::{hr_api_error, AppResult};
use serde_json::Value;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// The announcements actor that processes messages
pub struct AnnouncementsActor {
    api: HrApiClient,
    command_rx: mpsc::Receiver<AnnouncementsCommand>,
    /// Announcements already reported by the polling loop
    seen: HashSet<String>,
    /// Whether the first poll has baselined the seen set
    primed: bool,
}

/// Commands that can be sent to the announcements actor
pub enum AnnouncementsCommand {
    GetAnnouncements(mpsc::Sender<AppResult<Vec<Announcement>>>),
    CheckNewAnnouncements(mpsc::Sender<AppResult<Vec<Announcement>>>),
    Shutdown,
}

/// Handle for communicating with the announcements actor
#[derive(Clone)]
pub struct AnnouncementsActorHandle {
    command_tx: mpsc::Sender<AnnouncementsCommand>,
}

impl AnnouncementsActorHandle {
    /// Get the current announcements
    pub async fn get_announcements(&self) -> AppResult<Vec<Announcement>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(AnnouncementsCommand::GetAnnouncements(response_tx))
            .await
            .map_err(|e| hr_api_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| hr_api_error("Response channel closed"))?
    }

    /// Check for announcements posted since the last check
    pub async fn check_new_announcements(&self) -> AppResult<Vec<Announcement>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(AnnouncementsCommand::CheckNewAnnouncements(response_tx))
            .await
            .map_err(|e| hr_api_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| hr_api_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(AnnouncementsCommand::Shutdown).await;
        Ok(())
    }
}

impl AnnouncementsActor {
    /// Create a new actor and return its handle
    pub fn new(api: HrApiClient) -> (Self, AnnouncementsActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            api,
            command_rx,
            seen: HashSet::new(),
            primed: false,
        };

        let handle = AnnouncementsActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Announcements actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                AnnouncementsCommand::GetAnnouncements(response_tx) => {
                    let result = Self::get_announcements(&self.api).await;
                    let _ = response_tx.send(result).await;
                }
                AnnouncementsCommand::CheckNewAnnouncements(response_tx) => {
                    let result = self.check_new_announcements().await;
                    let _ = response_tx.send(result).await;
                }
                AnnouncementsCommand::Shutdown => {
                    info!("Announcements actor shutting down");
                    break;
                }
            }
        }

        info!("Announcements actor shut down");
    }

    /// Fetch announcements from the HR API, dropping records that don't
    /// deserialize
    pub async fn get_announcements(api: &HrApiClient) -> AppResult<Vec<Announcement>> {
        let payload = api.get_json("announcements", &[]).await?;

        let items = payload
            .get("data")
            .and_then(Value::as_array)
            .or_else(|| payload.as_array())
            .ok_or_else(|| hr_api_error("Expected an array of announcements"))?;

        let mut announcements = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match serde_json::from_value::<Announcement>(item.clone()) {
                Ok(announcement) => announcements.push(announcement),
                Err(e) => warn!("Skipping malformed announcement {}: {}", index, e),
            }
        }

        Ok(announcements)
    }

    /// Check for announcements not seen by a previous poll; the first poll
    /// only baselines the seen set
    async fn check_new_announcements(&mut self) -> AppResult<Vec<Announcement>> {
        let current = Self::get_announcements(&self.api).await?;

        let mut new_announcements = Vec::new();
        for announcement in &current {
            if self.seen.insert(announcement.identity()) && self.primed {
                new_announcements.push(announcement.clone());
            }
        }
        self.primed = true;

        Ok(new_announcements)
    }
}
