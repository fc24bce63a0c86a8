use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateUserReq, UserDto};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// Create a new user
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateUserReq>,
) -> Response {
    info!("Creating user: {:?}", req);

    match svc.create_user(req.into()).await {
        Ok(user) => (StatusCode::CREATED, Json(UserDto::from(user))).into_response(),
        Err(e) => {
            error!("Failed to create user: {}", e);
            map_domain_error(&e)
        }
    }
}

/// Get a specific user by ID; 404 with empty body when absent.
///
/// Identifiers are opaque: an id this service never issued (including one
/// that is not a UUID at all) is a resource that does not exist, not a bad
/// request.
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Response {
    info!("Getting user with id: {}", id);

    let Ok(id) = Uuid::parse_str(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match svc.get_user(id).await {
        Ok(Some(user)) => Json(UserDto::from(user)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            map_domain_error(&e)
        }
    }
}

/// List all users
pub async fn list_users(Extension(svc): Extension<Arc<Service>>) -> Response {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => {
            let dto_users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
            Json(dto_users).into_response()
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            map_domain_error(&e)
        }
    }
}

/// Delete a user by ID; 404 with empty body when nothing matched
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Response {
    info!("Deleting user: {}", id);

    let Ok(id) = Uuid::parse_str(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match svc.delete_user(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            map_domain_error(&e)
        }
    }
}
