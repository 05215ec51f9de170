//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Identity already registered: {0}")]
    DuplicateName(String),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Unable to generate unique participant id")]
    UnableToGenerateUniqueId,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Errors the user can fix by editing their input and resubmitting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::DuplicateName(_) | DomainError::EmptyName)
    }
}
