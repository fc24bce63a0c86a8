use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewUser, User};

/// REST DTO for user representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating a new user.
///
/// Fields default to empty strings so that missing fields reach the domain
/// validation ("email is required") instead of a serde rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}
