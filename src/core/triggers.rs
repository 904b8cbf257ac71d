use serde_json::Value;

use crate::models::{ChangeBatch, ScheduledTrigger};

/// Classified inbound trigger
#[derive(Debug, Clone)]
pub enum Trigger {
    Changes(ChangeBatch),
    Scheduled(ScheduledTrigger),
    Unrecognized,
}

/// Which store a change record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    Profiles,
    Postings,
    Unrecognized,
}

/// Classify an inbound trigger payload.
///
/// A record batch takes precedence over a scheduled source tag when a
/// payload somehow carries both. Whether a scheduled source tag is one we
/// act on is decided by the scan handler, not here.
pub fn classify_trigger(payload: &Value) -> Trigger {
    if let Some(records) = payload.get("records").and_then(Value::as_array) {
        return Trigger::Changes(ChangeBatch {
            records: records.clone(),
        });
    }

    if let Some(source) = payload.get("source").and_then(Value::as_str) {
        return Trigger::Scheduled(ScheduledTrigger {
            source: source.to_string(),
        });
    }

    Trigger::Unrecognized
}

/// Classify the origin store of a change record by its source identifier.
///
/// Source identifiers are environment-qualified table names, so matching is
/// by substring rather than equality.
pub fn classify_source(source: &str) -> ChangeSource {
    if source.contains("students") {
        ChangeSource::Profiles
    } else if source.contains("postings") {
        ChangeSource::Postings
    } else {
        ChangeSource::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_batch_classified_as_changes() {
        let payload = json!({ "records": [{ "operation": "insert" }] });
        assert!(matches!(classify_trigger(&payload), Trigger::Changes(_)));
    }

    #[test]
    fn test_source_tag_classified_as_scheduled() {
        let payload = json!({ "source": "uniwep.postings.tag" });
        match classify_trigger(&payload) {
            Trigger::Scheduled(trigger) => assert_eq!(trigger.source, "uniwep.postings.tag"),
            other => panic!("expected scheduled trigger, got {:?}", other),
        }
    }

    #[test]
    fn test_records_take_precedence_over_source() {
        let payload = json!({
            "records": [],
            "source": "uniwep.postings.tag",
        });
        assert!(matches!(classify_trigger(&payload), Trigger::Changes(_)));
    }

    #[test]
    fn test_unknown_payload_is_unrecognized() {
        let payload = json!({ "detail": "something else" });
        assert!(matches!(classify_trigger(&payload), Trigger::Unrecognized));
    }

    #[test]
    fn test_source_classification_by_substring() {
        assert_eq!(
            classify_source("uniwep-students-dev"),
            ChangeSource::Profiles
        );
        assert_eq!(
            classify_source("uniwep-postings-prod"),
            ChangeSource::Postings
        );
        assert_eq!(
            classify_source("uniwep-archive-dev"),
            ChangeSource::Unrecognized
        );
    }
}
