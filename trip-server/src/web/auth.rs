//! Basic-auth gate for the API routes.
//!
//! Credentials come from the environment as `user:password`; the
//! middleware decodes the `Basic` header token and compares. With no
//! credentials configured the gate is open, which is the local
//! development mode.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::routes::AppError;
use super::state::AppState;

/// Expected credentials for the API routes.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    credentials: Option<String>,
}

impl AuthConfig {
    /// Guards the API with the given `user:password` pair, or leaves it
    /// open when `None`.
    pub fn new(credentials: Option<String>) -> Self {
        Self { credentials }
    }

    /// An open gate.
    pub fn disabled() -> Self {
        Self::default()
    }

    fn accepts(&self, header: Option<&str>) -> bool {
        let Some(expected) = &self.credentials else {
            return true;
        };
        let Some(header) = header else {
            return false;
        };
        let Some(token) = header.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(token) else {
            return false;
        };
        decoded == expected.as_bytes()
    }
}

/// Rejects requests whose authorization header does not match the
/// configured credentials.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if state.auth.accepts(header) {
        Ok(next.run(request).await)
    } else {
        Err(AppError::Unauthorized)
    }
}
