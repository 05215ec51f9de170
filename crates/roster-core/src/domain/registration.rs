//! Registration workflow phases

use super::Participant;

/// Idle -> Validating -> (Success | DuplicateRejected)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegistrationPhase {
    #[default]
    Idle,
    /// Name passed the duplicate check; the record is being assigned.
    Validating(String),
    Success(Participant),
    DuplicateRejected(String),
}

impl RegistrationPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, RegistrationPhase::Validating(_))
    }
}
