//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::Violations;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] Violations),

    #[error("Duplicate entity: {entity_type} with id {id}")]
    Duplicate { entity_type: &'static str, id: Uuid },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub(crate) fn not_found(entity_type: &'static str, id: impl Into<Uuid>) -> Self {
        DomainError::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate(entity_type: &'static str, id: impl Into<Uuid>) -> Self {
        DomainError::Duplicate {
            entity_type,
            id: id.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
