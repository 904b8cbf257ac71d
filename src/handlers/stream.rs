use crate::core::triggers::{self, ChangeSource};
use crate::handlers::{notify, AppState};
use crate::models::{ChangeBatch, ChangeOp, ChangeRecord, Posting, ProfileRecord, StudentProfile};
use crate::services::SearchError;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that stop processing of a single change record
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("malformed change record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Process every record in a change batch. Records are isolated: a failure
/// is logged and the loop moves on to the next record.
pub async fn process_change_batch(state: &AppState, batch: ChangeBatch) {
    for record in batch.records {
        if let Err(e) = process_record(state, record).await {
            error!("Error processing change record: {}", e);
        }
    }
}

async fn process_record(state: &AppState, record: Value) -> Result<(), ProcessError> {
    let record: ChangeRecord = serde_json::from_value(record)?;

    if record.operation != ChangeOp::Insert {
        debug!("Ignoring {:?} from {}", record.operation, record.source);
        return Ok(());
    }

    let document = match record.document {
        Some(document) => document,
        None => {
            debug!("Insert from {} carried no document, skipping", record.source);
            return Ok(());
        }
    };

    match triggers::classify_source(&record.source) {
        ChangeSource::Profiles => handle_profile_change(state, document).await,
        ChangeSource::Postings => handle_posting_change(state, document).await,
        ChangeSource::Unrecognized => {
            warn!("Unrecognized change source: {}", record.source);
            Ok(())
        }
    }
}

async fn handle_profile_change(state: &AppState, document: Value) -> Result<(), ProcessError> {
    let record: ProfileRecord = serde_json::from_value(document)?;
    let profile = match StudentProfile::try_from(record) {
        Ok(profile) => profile,
        Err(e) => {
            info!("Incomplete profile record ({}), skipping", e);
            return Ok(());
        }
    };

    let postings = state.search.find_postings_for_profile(&profile).await?;
    notify::send_matched_postings(state, &profile, &postings).await;

    Ok(())
}

async fn handle_posting_change(state: &AppState, document: Value) -> Result<(), ProcessError> {
    // Posting documents come straight from the crawler; ones missing the
    // required fields are dropped without an operator alert.
    let posting: Posting = match serde_json::from_value(document) {
        Ok(posting) => posting,
        Err(e) => {
            info!("Posting record failed to parse ({}), skipping", e);
            return Ok(());
        }
    };

    // Alert operators before matching; the announcement is not gated on
    // match results.
    notify::announce_posting(state, &posting).await;

    let profiles = state
        .search
        .find_profiles_for_posting(&posting.majors, &posting.grades)
        .await?;
    notify::send_posting_to_profiles(state, &posting, &profiles).await;

    Ok(())
}
