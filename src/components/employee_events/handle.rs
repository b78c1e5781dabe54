use super::actor::{EmployeeEventsActor, EmployeeEventsActorHandle};
use super::models::RawEventRecord;
use crate::api::HrApiClient;
use crate::error::AppResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the employee events actor
#[derive(Clone)]
pub struct EmployeeEventsHandle {
    actor_handle: EmployeeEventsActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl EmployeeEventsHandle {
    /// Create a new EmployeeEventsHandle and spawn the actor
    pub fn new(api: HrApiClient) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = EmployeeEventsActor::new(api);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get the employee's events between two canonical dates, inclusive
    pub async fn get_events(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> AppResult<Vec<RawEventRecord>> {
        self.actor_handle.get_events(from.into(), to.into()).await
    }

    /// Check for events published since the last check
    pub async fn check_new_events(&self) -> AppResult<Vec<RawEventRecord>> {
        self.actor_handle.check_new_events().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}
