use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the users REST surface under `/api/users`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .layer(Extension(service))
}
