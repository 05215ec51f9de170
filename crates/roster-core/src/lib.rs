//! # Roster Core
//! 
//! Domain entities, services, and store ports for the group roster.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
