//! # Roster Core - Domain Module
//! 
//! Domain entities for the group roster.

pub mod participant;
pub mod group_config;
pub mod group;
pub mod roster_state;
pub mod registration;

// Re-export all entities and enums
pub use participant::Participant;
pub use group_config::GroupConfiguration;
pub use group::Group;
pub use roster_state::RosterState;
pub use registration::RegistrationPhase;
