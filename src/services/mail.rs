use crate::models::Notification;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when dispatching mail
#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Relay rejected message: {0}")]
    RelayError(String),
}

/// Mail relay client
///
/// Handles all communication with the HTTP mail relay. One POST per
/// recipient; the relay owns queuing and retries.
pub struct Mailer {
    endpoint: String,
    api_key: String,
    sender: String,
    client: Client,
}

impl Mailer {
    /// Create a new mail relay client
    pub fn new(endpoint: String, api_key: String, sender: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            sender,
            client,
        }
    }

    /// Deliver one rendered message
    pub async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        let url = format!("{}/messages", self.endpoint.trim_end_matches('/'));

        let payload = json!({
            "from": self.sender,
            "to": notification.to,
            "subject": notification.subject,
            "html": notification.html,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::RelayError(format!(
                "Delivery to {} failed: {}",
                notification.to,
                response.status()
            )));
        }

        tracing::debug!("Email sent to {}", notification.to);

        Ok(())
    }
}
