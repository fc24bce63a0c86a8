use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{NewUser, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{UniqueConstraint, UsersRepository};

/// Domain service with the validation & creation workflow.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    /// Gatekeep creation so that storage never receives an invalid or
    /// duplicate record. Checks run in a fixed order (email presence, name
    /// presence, email uniqueness) and short-circuit on the first failure;
    /// nothing is written on any failure path.
    #[instrument(
        name = "users.service.create_user",
        skip(self),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        if new_user.email.trim().is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if new_user.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.repo.email_exists(&new_user.email).await? {
            return Err(DomainError::conflict(UniqueConstraint::UsersEmail));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            created_at: Utc::now(),
        };

        // The unique index on email is the backstop for the check-then-insert
        // race; a violation here surfaces as the same Conflict kind.
        self.repo.insert(user.clone()).await?;

        info!("Created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        debug!("Getting user by id");
        Ok(self.repo.find_by_id(id).await?)
    }

    #[instrument(name = "users.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");
        Ok(self.repo.find_all().await?)
    }

    /// Returns false when no user with the given id existed.
    #[instrument(name = "users.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<bool, DomainError> {
        info!("Deleting user");
        Ok(self.repo.delete(id).await?)
    }
}
