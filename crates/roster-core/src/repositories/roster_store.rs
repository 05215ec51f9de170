//! Roster store trait (port)

use async_trait::async_trait;
use crate::domain::RosterState;
use crate::error::DomainError;

/// Persistence collaborator for the roster aggregate.
///
/// `load` returns an empty roster with the default configuration when nothing
/// has been saved yet. `save` writes the whole aggregate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn load(&self) -> Result<RosterState, DomainError>;
    async fn save(&self, state: &RosterState) -> Result<(), DomainError>;
}
