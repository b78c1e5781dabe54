mod actor;
pub mod digest;
mod handle;
pub mod mapper;
pub mod models;
mod scheduler;

pub use handle::EmployeeEventsHandle;
pub use mapper::{build_event_map, expand_range, normalize_date, EventsByDate};
pub use models::{CalendarEvent, RawEventRecord};

use crate::api::HrApiClient;
use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use self::scheduler::start_scheduler;

/// Employee events component: fetches the employee's calendar from the HR
/// API and drives the watch-mode digests
#[derive(Default)]
pub struct EmployeeEvents {
    handle: RwLock<Option<EmployeeEventsHandle>>,
}

impl EmployeeEvents {
    /// Create a new employee events component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }
}

#[async_trait]
impl super::Component for EmployeeEvents {
    fn name(&self) -> &'static str {
        "employee_events"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, api: HrApiClient) -> AppResult<()> {
        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        let handle = handle_lock
            .get_or_insert_with(|| EmployeeEventsHandle::new(api.clone()))
            .clone();

        // Start the digest/polling scheduler
        start_scheduler(config, handle).await;

        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
