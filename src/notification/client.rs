//! HipChat v2 API client
//!
//! Posts a room notification and reports whether HipChat accepted it.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::payload::HipChatMessage;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, derived from the resource `source`
#[derive(Debug, Clone)]
pub struct HipChatConfig {
    /// Server base URL (e.g. https://api.hipchat.com)
    pub server_url: String,
    /// Room notification token
    pub token: String,
    pub room_id: String,
    /// Accept invalid TLS certificates
    pub skip_ssl_verification: bool,
    pub timeout_secs: u64,
}

impl Default for HipChatConfig {
    fn default() -> Self {
        Self {
            server_url: "https://api.hipchat.com".to_string(),
            token: String::new(),
            room_id: String::new(),
            skip_ssl_verification: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug)]
pub struct HipChatClient {
    client: Client,
    config: HipChatConfig,
}

impl HipChatClient {
    pub fn new(config: HipChatConfig) -> Result<Self, String> {
        if config.token.is_empty() {
            return Err("token is required".to_string());
        }
        if config.room_id.is_empty() {
            return Err("room_id is required".to_string());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.skip_ssl_verification)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// Room notification endpoint, including the auth token
    pub fn notification_url(&self) -> String {
        format!(
            "{}/v2/room/{}/notification?auth_token={}",
            self.config.server_url.trim_end_matches('/'),
            self.config.room_id,
            self.config.token
        )
    }

    /// Build the payload for `message` addressed to the configured room
    pub fn message(&self, message: impl Into<String>) -> HipChatMessage {
        HipChatMessage::new(self.config.room_id.clone(), message)
    }

    /// Send a room notification; any non-2xx response is an error carrying the body
    pub async fn send(&self, message: &HipChatMessage) -> Result<(), String> {
        debug!(room_id = %self.config.room_id, "Sending HipChat notification");

        let response = self
            .client
            .post(self.notification_url())
            .json(message)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        let status = response.status();
        if status.is_success() {
            info!(room_id = %self.config.room_id, status = %status, "Notification delivered");
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("<response body unreadable: {}>", e),
        };
        Err(format!("HipChat responded with {}: {}", status, body))
    }
}
