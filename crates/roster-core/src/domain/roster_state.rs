//! Roster aggregate

use serde::{Deserialize, Serialize};

use super::{GroupConfiguration, Participant};

/// Everything the roster persists: participants (newest first) and sizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterState {
    pub participants: Vec<Participant>,
    pub config: GroupConfiguration,
}

impl RosterState {
    pub fn find_by_name(&self, normalized: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.has_name(normalized))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }
}
