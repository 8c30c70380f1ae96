//! Party domain errors
//!
//! Registry lookups and mutations report absence through `Option`/`bool`;
//! these errors are raised by the form and interface layers built on top.

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Party with the given ID was not found
    #[error("Party not found: {0}")]
    PartyNotFound(String),

    /// Invalid party data provided
    #[error("Invalid party data: {0}")]
    InvalidData(String),

    /// Unknown party type code
    #[error("Invalid party type {0:?}: expected PF or PJ")]
    InvalidPartyType(String),

    /// Party validation failed
    #[error("Party validation failed: {0}")]
    ValidationFailed(String),

    /// Stored or submitted JSON could not be decoded
    #[error("Malformed party JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

impl PartyError {
    /// Creates a PartyNotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PartyError::PartyNotFound(id.to_string())
    }

    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }

    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        PartyError::ValidationFailed(errors.join("; "))
    }
}
