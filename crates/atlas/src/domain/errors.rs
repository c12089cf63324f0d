//! Domain Errors
//!
//! Error types for domain operations. The derivation services themselves
//! are total; these only surface at the collaborator seams.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }
}
