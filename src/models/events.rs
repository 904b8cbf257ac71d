use serde::Deserialize;
use serde_json::Value;

/// Source tag that marks a scheduled payload as the recurring tag scan
pub const TAG_SCAN_SOURCE: &str = "uniwep.postings.tag";

/// Inbound batch of record-change events
///
/// Records stay untyped here so that one malformed record cannot fail the
/// whole batch at the deserialization boundary; each record is parsed
/// individually during processing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeBatch {
    pub records: Vec<Value>,
}

/// One record-change event inside a batch
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRecord {
    pub operation: ChangeOp,
    pub source: String,
    #[serde(default)]
    pub document: Option<Value>,
}

/// Operation kind of a change event; only inserts are acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
    Other,
}

impl<'de> Deserialize<'de> for ChangeOp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unknown operations map to Other instead of failing the record.
        let op = String::deserialize(deserializer)?;
        Ok(match op.as_str() {
            "insert" => ChangeOp::Insert,
            "update" => ChangeOp::Update,
            "delete" => ChangeOp::Delete,
            _ => ChangeOp::Other,
        })
    }
}

/// Inbound scheduled payload
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledTrigger {
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_record_parses_insert() {
        let record: ChangeRecord = serde_json::from_value(json!({
            "operation": "insert",
            "source": "uniwep-postings-dev",
            "document": { "organizationName": "테스트기관" },
        }))
        .unwrap();
        assert_eq!(record.operation, ChangeOp::Insert);
        assert!(record.document.is_some());
    }

    #[test]
    fn test_unknown_operation_maps_to_other() {
        let record: ChangeRecord = serde_json::from_value(json!({
            "operation": "truncate",
            "source": "uniwep-postings-dev",
        }))
        .unwrap();
        assert_eq!(record.operation, ChangeOp::Other);
        assert!(record.document.is_none());
    }
}
