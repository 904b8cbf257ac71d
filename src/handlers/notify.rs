use crate::core::render;
use crate::handlers::AppState;
use crate::models::{Notification, Posting, ProfileRecord, StudentProfile};
use crate::services::AlertKind;
use tracing::{debug, error, info, warn};

/// Announce a new posting to operators. Not gated on match results.
pub async fn announce_posting(state: &AppState, posting: &Posting) {
    let alert = render::new_posting_alert(&state.environment, posting);
    if let Err(e) = state.chat.send(AlertKind::NewPosting, &alert).await {
        warn!(
            "Failed to announce posting from {}: {}",
            posting.organization_name, e
        );
    }
}

/// Mail one new posting to every eligible student, then post a send summary
/// counting successful deliveries. The summary goes out even when the count
/// is zero.
pub async fn send_posting_to_profiles(
    state: &AppState,
    posting: &Posting,
    profiles: &[StudentProfile],
) {
    let subject = render::new_posting_subject(&state.environment);
    let mut sent = 0usize;

    for profile in profiles {
        let notification = Notification {
            to: profile.email.clone(),
            recipient: profile.name.clone(),
            subject: subject.clone(),
            html: render::new_posting_email(&profile.name, posting),
        };
        match state.mailer.send(&notification).await {
            Ok(()) => sent += 1,
            Err(e) => warn!(
                "Failed to email {} ({}): {}",
                notification.recipient, notification.to, e
            ),
        }
    }

    let summary =
        render::posting_send_summary(&state.environment, &posting.organization_name, sent);
    if let Err(e) = state.chat.send(AlertKind::SendSummary, &summary).await {
        warn!("Failed to post send summary: {}", e);
    }
}

/// Mail one student the aggregated list of open postings that match them.
/// Nothing goes out when the list is empty, and the summary is only posted
/// after a successful delivery.
pub async fn send_matched_postings(
    state: &AppState,
    profile: &StudentProfile,
    postings: &[Posting],
) {
    if postings.is_empty() {
        info!("No matching postings for {}", profile.email);
        return;
    }

    let notification = Notification {
        to: profile.email.clone(),
        recipient: profile.name.clone(),
        subject: render::matched_postings_subject(&state.environment),
        html: render::matched_postings_email(&profile.name, postings),
    };

    if let Err(e) = state.mailer.send(&notification).await {
        warn!(
            "Failed to email {} ({}): {}",
            notification.recipient, notification.to, e
        );
        return;
    }

    let summary = render::profile_send_summary(&state.environment, &profile.name, &profile.email);
    if let Err(e) = state.chat.send(AlertKind::SendSummary, &summary).await {
        warn!("Failed to post send summary: {}", e);
    }
}

/// Run the tag digest over every scanned profile. Each student is handled
/// independently; one failure never stops the loop.
pub async fn send_tag_digests(state: &AppState, records: Vec<ProfileRecord>) {
    for record in records {
        let profile = match StudentProfile::try_from(record) {
            Ok(profile) => profile,
            Err(e) => {
                info!("Skipping incomplete profile in tag scan ({})", e);
                continue;
            }
        };

        if profile.tags.is_empty() {
            debug!("No tags for {}, skipping", profile.email);
            continue;
        }

        let postings = match state.search.find_postings_by_tags(&profile.tags).await {
            Ok(postings) => postings,
            Err(e) => {
                error!("Tag search for {} failed: {}", profile.email, e);
                continue;
            }
        };

        if postings.is_empty() {
            info!("No matches for {}", profile.email);
            continue;
        }

        let notification = Notification {
            to: profile.email.clone(),
            recipient: profile.name.clone(),
            subject: render::tag_digest_subject(),
            html: render::tag_digest_email(&profile.name, &postings),
        };

        if let Err(e) = state.mailer.send(&notification).await {
            warn!(
                "Failed to email {} ({}): {}",
                notification.recipient, notification.to, e
            );
            continue;
        }

        let summary = render::tag_send_summary(&profile.name, &profile.email);
        if let Err(e) = state.chat.send(AlertKind::SendSummary, &summary).await {
            warn!("Failed to post send summary: {}", e);
        }
    }
}
