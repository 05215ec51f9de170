// ============================================================================
// Roster Core - Group Configuration
// File: crates/roster-core/src/domain/group_config.rs
// Description: Expected headcount, target group size, and derived group count
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use roster_shared::constants::{DEFAULT_EXPECTED_PARTICIPANTS, DEFAULT_TARGET_GROUP_SIZE};

/// Group sizing parameters.
///
/// `active_group_count` is always `max(1, ceil(expected / target))`; the
/// update methods recompute it and never touch the other input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfiguration {
    #[serde(alias = "expectedStudents")]
    #[validate(range(min = 1, message = "Expected participants must be at least 1"))]
    pub expected_participant_count: u32,

    #[validate(range(min = 1, message = "Target group size must be at least 1"))]
    pub target_group_size: u32,

    #[serde(alias = "activeGroups")]
    #[validate(range(min = 1, message = "Active group count must be at least 1"))]
    pub active_group_count: u32,
}

impl GroupConfiguration {
    pub fn new(expected_participant_count: u32, target_group_size: u32) -> Self {
        let expected_participant_count = expected_participant_count.max(1);
        let target_group_size = target_group_size.max(1);
        Self {
            expected_participant_count,
            target_group_size,
            active_group_count: Self::group_count_for(expected_participant_count, target_group_size),
        }
    }

    pub fn group_count_for(expected: u32, target_size: u32) -> u32 {
        expected.div_ceil(target_size.max(1)).max(1)
    }

    pub fn update_expected(&self, expected_participant_count: u32) -> Self {
        Self::new(expected_participant_count, self.target_group_size)
    }

    pub fn update_group_size(&self, target_group_size: u32) -> Self {
        Self::new(self.expected_participant_count, target_group_size)
    }

    /// Re-derives the group count from the two inputs, e.g. after loading a
    /// hand-edited blob.
    pub fn normalized(&self) -> Self {
        Self::new(self.expected_participant_count, self.target_group_size)
    }
}

impl Default for GroupConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_PARTICIPANTS, DEFAULT_TARGET_GROUP_SIZE)
    }
}
