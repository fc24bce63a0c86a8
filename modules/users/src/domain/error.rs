use thiserror::Error;

use crate::domain::repo::{RepoError, UniqueConstraint};

/// Domain-level failure kinds, interpreted exactly once at the REST boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied data failed a precondition; recoverable by resubmitting.
    #[error("{message}")]
    Validation { message: String },

    /// A uniqueness constraint rejected the write, either in the workflow's
    /// own check or at the storage backstop.
    #[error("unique constraint conflict: {constraint:?}")]
    Conflict { constraint: UniqueConstraint },

    /// Anything else; never exposed to the caller in raw form.
    #[error("database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(constraint: UniqueConstraint) -> Self {
        Self::Conflict { constraint }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::UniqueViolation(constraint) => Self::Conflict { constraint },
            RepoError::Backend(e) => Self::Database {
                message: e.to_string(),
            },
        }
    }
}
