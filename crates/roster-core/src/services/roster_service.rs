// ============================================================================
// Roster Core - Roster Service
// File: crates/roster-core/src/services/roster_service.rs
// ============================================================================
//! Registration, grouping, configuration, and clearing over one roster.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use roster_shared::constants::REGISTRATION_PAUSE_MS;

use crate::domain::{Group, GroupConfiguration, Participant, RosterState};
use crate::error::DomainError;
use crate::repositories::RosterStore;

use super::assignment::{assign, RandomSource};
use super::export::render_roster_csv;
use super::grouping::{partition, stale_participants};
use super::pacing::Pacer;

const MAX_ID_ATTEMPTS: usize = 64;

/// Owns the roster aggregate. Every mutation builds the next state, saves it,
/// and only then replaces the in-memory copy.
pub struct RosterService<S: RosterStore, R: RandomSource, P: Pacer> {
    store: Arc<S>,
    rng: R,
    pacer: Arc<P>,
    registration_pause: Duration,
    state: RosterState,
}

impl<S: RosterStore, R: RandomSource, P: Pacer> RosterService<S, R, P> {
    /// Load the roster from the store.
    pub async fn open(store: Arc<S>, rng: R, pacer: Arc<P>) -> Result<Self, DomainError> {
        let state = store.load().await?;
        debug!(
            "Roster loaded: {} participants, {} groups",
            state.participants.len(),
            state.config.active_group_count
        );

        Ok(Self {
            store,
            rng,
            pacer,
            registration_pause: Duration::from_millis(REGISTRATION_PAUSE_MS),
            state,
        })
    }

    pub fn with_registration_pause(mut self, pause: Duration) -> Self {
        self.registration_pause = pause;
        self
    }

    /// Newest first.
    pub fn participants(&self) -> &[Participant] {
        &self.state.participants
    }

    pub fn config(&self) -> GroupConfiguration {
        self.state.config
    }

    /// Idle -> Validating: returns the normalized name when it may register.
    pub fn validate_name(&self, raw: &str) -> Result<String, DomainError> {
        let name = Participant::normalize_name(raw);
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }

        if self.state.find_by_name(&name).is_some() {
            warn!("Registration rejected: name already registered: {}", name);
            return Err(DomainError::DuplicateName(name));
        }

        Ok(name)
    }

    /// Register a new participant
    pub async fn register(&mut self, raw: &str) -> Result<Participant, DomainError> {
        // 1. Validate name
        let name = self.validate_name(raw)?;
        info!("Registration attempt for: {}", name);

        // 2. Show the in-progress state
        self.pacer.pause(self.registration_pause).await;

        // 3. Assign group and id
        let group_count = self.state.config.active_group_count;
        let group_number = assign(&mut self.rng, group_count);
        let id = self.next_participant_id()?;

        let participant = Participant::new(id, &name, group_number)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        // 4. Prepend and persist
        let mut next = self.state.clone();
        next.participants.insert(0, participant.clone());
        self.commit(next).await?;

        info!(
            "Registration successful for: {} ({}) -> group {}",
            participant.name, participant.id, participant.group_number
        );
        Ok(participant)
    }

    pub fn groups(&self) -> Vec<Group> {
        partition(&self.state.participants, self.state.config.active_group_count)
    }

    /// Participants whose group number no longer exists.
    pub fn stale_count(&self) -> usize {
        stale_participants(&self.state.participants, self.state.config.active_group_count).len()
    }

    pub async fn set_expected(&mut self, expected: u32) -> Result<GroupConfiguration, DomainError> {
        let config = self.state.config.update_expected(expected);
        self.apply_config(config).await
    }

    pub async fn set_group_size(&mut self, size: u32) -> Result<GroupConfiguration, DomainError> {
        let config = self.state.config.update_group_size(size);
        self.apply_config(config).await
    }

    /// Empties the participant collection. Configuration is kept.
    pub async fn clear(&mut self) -> Result<usize, DomainError> {
        let removed = self.state.participants.len();
        let next = RosterState {
            participants: Vec::new(),
            config: self.state.config,
        };
        self.commit(next).await?;

        info!("Roster cleared: {} participants removed", removed);
        Ok(removed)
    }

    pub fn export_csv(&self) -> String {
        render_roster_csv(&self.state.participants)
    }

    async fn apply_config(&mut self, config: GroupConfiguration) -> Result<GroupConfiguration, DomainError> {
        if config == self.state.config {
            return Ok(config);
        }

        let next = RosterState {
            participants: self.state.participants.clone(),
            config,
        };
        self.commit(next).await?;

        info!(
            "Group configuration changed: expected={}, size={}, groups={}",
            config.expected_participant_count, config.target_group_size, config.active_group_count
        );
        Ok(config)
    }

    async fn commit(&mut self, next: RosterState) -> Result<(), DomainError> {
        self.store.save(&next).await?;
        self.state = next;
        Ok(())
    }

    fn next_participant_id(&mut self) -> Result<String, DomainError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = format!("ST-{}", self.rng.next_in_range(1000, 9999));
            if !self.state.contains_id(&candidate) {
                return Ok(candidate);
            }
        }
        Err(DomainError::UnableToGenerateUniqueId)
    }
}
