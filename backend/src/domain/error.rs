use thiserror::Error;

/// Failures a domain operation reports to its caller.
///
/// Every variant is scoped to a single request; none is fatal to the process.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or malformed input, rejected before anything is persisted
    #[error("{0}")]
    Validation(String),

    /// Referenced record does not exist within the caller's account
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
