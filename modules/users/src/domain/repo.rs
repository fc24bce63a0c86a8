use crate::contract::model::User;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Named unique constraints the storage layer can report.
///
/// Everything above the repository port consumes this enum; free-text
/// backend messages never cross the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueConstraint {
    /// The unique index on `users.email` (`ux_users_email`).
    UsersEmail,
    /// A constraint this module does not know by name.
    Other(String),
}

impl UniqueConstraint {
    /// Classify a backend violation message. Engines that expose constraint
    /// names hit the index-name check; the bare column-name check is the
    /// fallback for engines that only echo the column list.
    pub fn from_backend(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("ux_users_email") || lower.contains("email") {
            Self::UsersEmail
        } else {
            Self::Other(message.to_string())
        }
    }
}

/// Errors surfaced by the repository port.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unique constraint violated: {0:?}")]
    UniqueViolation(UniqueConstraint),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the workflow needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    /// List every user; ordering is a storage detail.
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;
    /// Check uniqueness by email (exact match).
    async fn email_exists(&self, email: &str) -> Result<bool, RepoError>;
    /// Insert a fully-formed domain user.
    ///
    /// The service computes id/timestamp/validation; the repo persists.
    async fn insert(&self, user: User) -> Result<(), RepoError>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}
