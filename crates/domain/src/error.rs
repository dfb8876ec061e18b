use thiserror::Error;

/// Domain-level errors
///
/// Store failures are carried as `Database` with the driver message; callers
/// surface them as opaque failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound(format!("{} {} not found", entity, id))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
