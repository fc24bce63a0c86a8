//! Error translation layer: every domain failure is rendered as one uniform
//! four-field JSON envelope. Internal details are logged here and never
//! leave this module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::repo::UniqueConstraint;

/// The client-facing error envelope. Exactly these four fields; no stack
/// traces, no internal identifiers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        timestamp: Utc::now(),
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// Map a domain error to status, category and curated message.
pub fn map_domain_error(e: &DomainError) -> Response {
    match e {
        DomainError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, message.clone())
        }
        DomainError::Conflict { constraint } => {
            let message = match constraint {
                UniqueConstraint::UsersEmail => "email already registered",
                UniqueConstraint::Other(raw) => {
                    tracing::warn!(constraint = %raw, "Unrecognized unique constraint violation");
                    "data integrity violation"
                }
            };
            error_response(StatusCode::CONFLICT, message)
        }
        DomainError::Database { message } => {
            // Log the internal details but don't expose them to the client
            tracing::error!(error = %message, "Database error occurred");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
        }
    }
}
