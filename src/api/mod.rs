pub mod session;

pub use session::SessionManager;

use crate::config::Config;
use crate::error::{hr_api_error, AppResult};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// HTTP client for the HR self-service API.
///
/// Owns the reqwest client and the session manager; all component actors go
/// through this for authenticated requests.
#[derive(Clone)]
pub struct HrApiClient {
    config: Arc<RwLock<Config>>,
    client: Client,
    session: SessionManager,
}

impl HrApiClient {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        let client = Client::new();
        let session = SessionManager::new(Arc::clone(&config), client.clone());

        Self {
            config,
            client,
            session,
        }
    }

    /// Build a full endpoint URL with query parameters
    async fn endpoint(&self, path: &str, query: &[(&str, String)]) -> AppResult<Url> {
        let base = {
            let config_read = self.config.read().await;
            config_read.api_base_url.clone()
        };

        let url_str = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
        let mut url = Url::parse(&url_str)
            .map_err(|e| hr_api_error(&format!("Failed to parse URL: {}", e)))?;

        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }

    /// Perform an authenticated GET and decode the JSON body
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<serde_json::Value> {
        let url = self.endpoint(path, query).await?;
        let token = self.session.access_token().await?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| hr_api_error(&format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(hr_api_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| hr_api_error(&format!("Failed to parse response: {}", e)))
    }
}
