//! Replaceable per-request access control. The default policy permits every
//! request (local/dev mode); the `basic` policy requires HTTP Basic
//! credentials from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use runtime::{AccessPolicyKind, SecurityConfig};

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Access control policy invoked once per request.
pub trait AccessPolicy: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> Decision;
}

/// Permits everything.
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _headers: &HeaderMap) -> Decision {
        Decision::Allow
    }
}

/// HTTP Basic authentication against a configured credential map.
pub struct BasicAuth {
    users: HashMap<String, String>,
}

impl BasicAuth {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    fn credentials(headers: &HeaderMap) -> Option<(String, String)> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let encoded = value.strip_prefix("Basic ")?;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (user, password) = decoded.split_once(':')?;
        Some((user.to_string(), password.to_string()))
    }
}

impl AccessPolicy for BasicAuth {
    fn authorize(&self, headers: &HeaderMap) -> Decision {
        match Self::credentials(headers) {
            Some((user, password)) if self.users.get(&user) == Some(&password) => Decision::Allow,
            _ => Decision::Deny,
        }
    }
}

/// Build the policy selected by configuration.
pub fn from_config(cfg: &SecurityConfig) -> Arc<dyn AccessPolicy> {
    match cfg.policy {
        AccessPolicyKind::AllowAll => Arc::new(AllowAll),
        AccessPolicyKind::Basic => Arc::new(BasicAuth::new(cfg.users.clone())),
    }
}

/// Middleware that asks the policy before letting a request through.
pub async fn enforce(
    State(policy): State<Arc<dyn AccessPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    match policy.authorize(req.headers()) {
        Decision::Allow => next.run(req).await,
        Decision::Deny => (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"user-service\"")],
        )
            .into_response(),
    }
}
