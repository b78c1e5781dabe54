use super::actor::{AnnouncementsActor, AnnouncementsActorHandle};
use super::models::Announcement;
use crate::api::HrApiClient;
use crate::error::AppResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the announcements actor
#[derive(Clone)]
pub struct AnnouncementsHandle {
    actor_handle: AnnouncementsActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl AnnouncementsHandle {
    /// Create a new AnnouncementsHandle and spawn the actor
    pub fn new(api: HrApiClient) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = AnnouncementsActor::new(api);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get the current announcements
    pub async fn get_announcements(&self) -> AppResult<Vec<Announcement>> {
        self.actor_handle.get_announcements().await
    }

    /// Check for announcements posted since the last check
    pub async fn check_new_announcements(&self) -> AppResult<Vec<Announcement>> {
        self.actor_handle.check_new_announcements().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}
