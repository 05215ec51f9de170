//! Group entity (derived, never persisted)

use serde::Serialize;

use super::Participant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub number: u32,
    pub members: Vec<Participant>,
}

impl Group {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
