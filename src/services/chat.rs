use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when posting chat alerts
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Webhook rejected message: {0}")]
    WebhookError(String),
}

/// Operator channel a message goes to; each kind has its own webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    NewPosting,
    SendSummary,
}

/// Operator chat client
///
/// Posts plain-text messages to the incoming webhooks of the operator
/// channels.
pub struct ChatNotifier {
    new_posting_webhook: String,
    send_summary_webhook: String,
    client: Client,
}

impl ChatNotifier {
    /// Create a new chat client
    pub fn new(new_posting_webhook: String, send_summary_webhook: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            new_posting_webhook,
            send_summary_webhook,
            client,
        }
    }

    fn webhook(&self, kind: AlertKind) -> &str {
        match kind {
            AlertKind::NewPosting => &self.new_posting_webhook,
            AlertKind::SendSummary => &self.send_summary_webhook,
        }
    }

    /// Post one message to the channel for the given kind
    pub async fn send(&self, kind: AlertKind, message: &str) -> Result<(), ChatError> {
        let response = self
            .client
            .post(self.webhook(kind))
            .json(&json!({ "text": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::WebhookError(format!(
                "{:?} alert failed: {}",
                kind,
                response.status()
            )));
        }

        tracing::debug!("Chat message sent to {:?} channel", kind);

        Ok(())
    }
}
