// Trigger handling layer
pub mod notify;
pub mod scan;
pub mod stream;

use crate::core::triggers::{self, Trigger};
use crate::services::{ChatNotifier, Mailer, ProfileStore, SearchClient};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

/// Shared application state holding the process-scoped clients
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchClient>,
    pub store: Arc<ProfileStore>,
    pub mailer: Arc<Mailer>,
    pub chat: Arc<ChatNotifier>,
    pub environment: String,
}

/// Route one trigger payload to its handler and return the label of the
/// trigger kind for the response body
pub async fn dispatch(state: &AppState, payload: &Value) -> &'static str {
    match triggers::classify_trigger(payload) {
        Trigger::Changes(batch) => {
            stream::process_change_batch(state, batch).await;
            "change-batch"
        }
        Trigger::Scheduled(trigger) => {
            if let Err(e) = scan::process_scheduled(state, &trigger).await {
                error!("Tag scan for source {} failed: {}", trigger.source, e);
            }
            "tag-scan"
        }
        Trigger::Unrecognized => {
            warn!("Unrecognized trigger payload, ignoring");
            "ignored"
        }
    }
}
