mod actor;
mod handle;
pub mod models;

pub use handle::AnnouncementsHandle;
pub use models::Announcement;

use crate::api::HrApiClient;
use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::error;

use self::models::format_new_announcements;

/// Announcements component: fetches company announcements and polls for new
/// ones in watch mode
#[derive(Default)]
pub struct Announcements {
    handle: RwLock<Option<AnnouncementsHandle>>,
}

impl Announcements {
    /// Create a new announcements component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }
}

#[async_trait]
impl super::Component for Announcements {
    fn name(&self) -> &'static str {
        "announcements"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, api: HrApiClient) -> AppResult<()> {
        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        let handle = handle_lock
            .get_or_insert_with(|| AnnouncementsHandle::new(api.clone()))
            .clone();

        let check_interval = {
            let config_read = config.read().await;
            config_read.new_events_check_interval
        };

        // Poll for newly posted announcements
        tokio::spawn(async move {
            loop {
                sleep(TokioDuration::from_secs(check_interval)).await;

                match handle.check_new_announcements().await {
                    Ok(new_announcements) => {
                        if let Some(message) = format_new_announcements(&new_announcements) {
                            println!("{}", message);
                        }
                    }
                    Err(e) => {
                        error!("Failed to check for new announcements: {}", e);
                    }
                }
            }
        });

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
