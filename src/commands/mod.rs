use crate::api::HrApiClient;
use crate::config::Config;
use crate::error::AppResult;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

// Export submodules
pub mod announcements;
pub mod calendar;

/// Shared context for all commands
pub struct CommandContext {
    pub config: Arc<RwLock<Config>>,
    pub api: HrApiClient,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        let api = HrApiClient::new(Arc::clone(&config));
        Self { config, api }
    }

    /// Display timezone from the configuration, falling back to UTC
    pub async fn timezone(&self) -> Tz {
        let timezone = {
            let config_read = self.config.read().await;
            config_read.timezone.clone()
        };

        match timezone.parse() {
            Ok(tz) => tz,
            Err(_) => {
                warn!("Invalid timezone '{}', falling back to UTC", timezone);
                chrono_tz::UTC
            }
        }
    }
}

/// Type alias for command result
pub type CommandResult = AppResult<()>;
