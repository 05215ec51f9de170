// ============================================================================
// Roster Core - Participant Entity
// File: crates/roster-core/src/domain/participant.rs
// Description: Registered individual with an assigned group number
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Participant entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[validate(length(min = 1, message = "Participant id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    // Older blobs call this field registrationNumber
    #[serde(alias = "registrationNumber")]
    #[validate(range(min = 1, message = "Group number must be at least 1"))]
    pub group_number: u32,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        id: String,
        name: &str,
        group_number: u32,
    ) -> Result<Self, validator::ValidationErrors> {
        let participant = Self {
            id,
            name: Self::normalize_name(name),
            group_number,
            timestamp: Utc::now(),
        };

        participant.validate()?;
        Ok(participant)
    }

    /// Trimmed, upper-cased form used for storage and comparison.
    pub fn normalize_name(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Case-insensitive exact match against an already normalized name.
    pub fn has_name(&self, normalized: &str) -> bool {
        self.name.to_uppercase() == normalized
    }

    pub fn is_stale(&self, group_count: u32) -> bool {
        self.group_number == 0 || self.group_number > group_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_participant_normalizes_name() {
        let participant = Participant::new("ST-1234".to_string(), "  alex rivera ", 3).unwrap();
        assert_eq!(participant.name, "ALEX RIVERA");
        assert_eq!(participant.group_number, 3);
    }

    #[test]
    fn test_rejects_group_zero() {
        assert!(Participant::new("ST-1234".to_string(), "Alex", 0).is_err());
    }

    #[test]
    fn test_long_and_expanding_names_are_accepted() {
        let long = Participant::new("ST-1234".to_string(), &"a".repeat(101), 1).unwrap();
        assert_eq!(long.name.chars().count(), 101);

        // "ß" upper-cases to "SS"
        let expanding = Participant::new("ST-1235".to_string(), &"ß".repeat(60), 1).unwrap();
        assert_eq!(expanding.name, "SS".repeat(60));
    }

    #[test]
    fn test_has_name_ignores_case_of_stored_value() {
        let mut participant = Participant::new("ST-1234".to_string(), "Alex", 1).unwrap();
        participant.name = "Alex".to_string();
        assert!(participant.has_name("ALEX"));
        assert!(!participant.has_name("ALEXANDER"));
    }

    #[test]
    fn test_reads_legacy_blob_fields() {
        let json = r#"{
            "id": "ST-4821",
            "name": "JORDAN LEE",
            "registrationNumber": 4,
            "groupId": null,
            "timestamp": 1735689600000
        }"#;

        let participant: Participant = serde_json::from_str(json).unwrap();
        assert_eq!(participant.group_number, 4);
        assert_eq!(participant.timestamp.timestamp_millis(), 1_735_689_600_000);

        let written = serde_json::to_value(&participant).unwrap();
        assert_eq!(written["groupNumber"], 4);
        assert!(written.get("registrationNumber").is_none());
    }
}
