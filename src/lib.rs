//! UniWEP Notify - internship posting match and notification service
//!
//! This library matches field-training postings to student profiles and
//! drives the outbound notifications: per-student emails through the mail
//! relay and operator alerts through chat webhooks.

pub mod config;
pub mod core;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::triggers::{classify_source, classify_trigger, ChangeSource, Trigger};
pub use crate::models::{
    GradeEligibility, MajorEligibility, Posting, ProfileRecord, StudentProfile,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let payload = json!({ "source": "uniwep.postings.tag" });
        assert!(matches!(classify_trigger(&payload), Trigger::Scheduled(_)));
    }
}
