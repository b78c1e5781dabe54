use crate::config::Config;
use crate::error::{auth_error, AppResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// A logged-in session with the HR API
#[derive(Debug, Clone)]
struct Session {
    token: String,
    expires_at: i64,
}

/// Manages the HR API session token.
///
/// The token is cached in memory and refreshed by logging in again when it
/// expires; login uses the employee credentials from the configuration.
#[derive(Clone)]
pub struct SessionManager {
    config: Arc<RwLock<Config>>,
    client: Client,
    session: Arc<RwLock<Option<Session>>>,
}

impl SessionManager {
    pub fn new(config: Arc<RwLock<Config>>, client: Client) -> Self {
        Self {
            config,
            client,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Get a valid access token, logging in if needed
    pub async fn access_token(&self) -> AppResult<String> {
        // Reuse the cached session while it is still valid
        {
            let session_read = self.session.read().await;
            if let Some(session) = &*session_read {
                if session.expires_at > Utc::now().timestamp() {
                    return Ok(session.token.clone());
                }
            }
        }

        // Expired or never logged in
        let session = self.login().await?;
        let token = session.token.clone();
        *self.session.write().await = Some(session);

        Ok(token)
    }

    /// Log in with the configured employee credentials
    async fn login(&self) -> AppResult<Session> {
        let (base_url, employee_id, password) = {
            let config_read = self.config.read().await;
            (
                config_read.api_base_url.clone(),
                config_read.employee_id.clone(),
                config_read.password.clone(),
            )
        };

        let login_url = format!("{}/auth/login", base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&login_url)
            .json(&json!({
                "employee_id": &employee_id,
                "password": &password,
            }))
            .send()
            .await
            .map_err(|e| auth_error(&format!("Login request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Login failed: HTTP {} - {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse login response: {}", e)))?;

        let token = body
            .get("token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| auth_error("Login response missing 'token' field"))?
            .to_string();

        // Expiry defaults to an hour when the API omits it
        let expires_in = body.get("expires_in").and_then(|v| v.as_i64()).unwrap_or(3600);
        let expires_at = Utc::now().timestamp() + expires_in;

        info!("Logged in to HR API as employee {}", employee_id);

        Ok(Session { token, expires_at })
    }
}
