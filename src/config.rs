use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Default color token for events the API delivers without one
pub const DEFAULT_EVENT_COLOR: &str = "#2a9d8f";

/// Default poll interval for new events/announcements, in seconds
pub const DEFAULT_CHECK_INTERVAL: u64 = 300;

/// Main configuration structure for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the HR self-service API
    pub api_base_url: String,
    /// Employee ID used for login
    pub employee_id: String,
    /// Password used for login
    pub password: String,
    /// Timezone for calendar views and digest scheduling
    pub timezone: String,
    /// Time of day (HH:MM) for the daily digest in watch mode
    pub daily_digest_time: String,
    /// Time of day (HH:MM) for the weekly digest on Mondays in watch mode
    pub weekly_digest_time: String,
    /// Poll interval for new events/announcements, in seconds
    pub new_events_check_interval: u64,
    /// Color token used when an event carries none
    pub default_event_color: String,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let api_base_url =
            env::var("HR_API_BASE_URL").map_err(|_| env_error("HR_API_BASE_URL"))?;
        let employee_id = env::var("HR_EMPLOYEE_ID").map_err(|_| env_error("HR_EMPLOYEE_ID"))?;
        let password = env::var("HR_PASSWORD").map_err(|_| env_error("HR_PASSWORD"))?;

        // Optional variables with defaults
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let daily_digest_time =
            env::var("DAILY_DIGEST_TIME").unwrap_or_else(|_| String::from("08:00"));
        let weekly_digest_time =
            env::var("WEEKLY_DIGEST_TIME").unwrap_or_else(|_| String::from("08:00"));
        let default_event_color =
            env::var("DEFAULT_EVENT_COLOR").unwrap_or_else(|_| String::from(DEFAULT_EVENT_COLOR));

        let new_events_check_interval = match env::var("NEW_EVENTS_CHECK_INTERVAL") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| config_error("Invalid NEW_EVENTS_CHECK_INTERVAL format"))?,
            Err(_) => DEFAULT_CHECK_INTERVAL,
        };

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("employee_events".to_string(), true);
        components.insert("announcements".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            api_base_url,
            employee_id,
            password,
            timezone,
            daily_digest_time,
            weekly_digest_time,
            new_events_check_interval,
            default_event_color,
            components,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }
}
