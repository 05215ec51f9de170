//! In-process roster store

use std::sync::Mutex;

use async_trait::async_trait;

use roster_core::domain::RosterState;
use roster_core::error::DomainError;
use roster_core::repositories::RosterStore;

/// Keeps the roster in memory only. Backs the service and TUI tests.
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    state: Mutex<Option<RosterState>>,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RosterState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// Last saved state, if any save happened.
    pub fn snapshot(&self) -> Option<RosterState> {
        self.state.lock().ok().and_then(|s| s.clone())
    }
}

#[async_trait]
impl RosterStore for MemoryRosterStore {
    async fn load(&self) -> Result<RosterState, DomainError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| DomainError::StorageError(e.to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    async fn save(&self, state: &RosterState) -> Result<(), DomainError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| DomainError::StorageError(e.to_string()))?;
        *guard = Some(state.clone());
        Ok(())
    }
}
