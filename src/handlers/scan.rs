use crate::handlers::{notify, AppState};
use crate::models::{ScheduledTrigger, TAG_SCAN_SOURCE};
use crate::services::StoreError;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a scheduled scan before any mail goes out
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle a scheduled trigger. Only the tag-scan source is known; anything
/// else is logged and dropped.
pub async fn process_scheduled(
    state: &AppState,
    trigger: &ScheduledTrigger,
) -> Result<(), ScanError> {
    if trigger.source != TAG_SCAN_SOURCE {
        warn!("Unhandled scheduled source: {}", trigger.source);
        return Ok(());
    }

    info!("Starting tag scan");

    let profiles = state.store.list_active_profiles().await?;
    info!("Tag scan covers {} active profiles", profiles.len());

    notify::send_tag_digests(state, profiles).await;

    Ok(())
}
