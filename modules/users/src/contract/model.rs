use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure user model shared across layers (no serde).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user. Both fields are validated by the domain
/// service before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}
