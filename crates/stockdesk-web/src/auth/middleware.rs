use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use stockdesk_core::{matches, verify_session};

use super::cookie::{read_cookie, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Grants access to the read-only data endpoints.
///
/// Accepts either `Authorization: Bearer <token>` or the session cookie.
pub struct DataAccess;

/// Grants access to write endpoints. Only the session cookie is accepted.
pub struct CookieSession;

impl FromRequestParts<AppState> for DataAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = configured_token(state)?;

        let bearer_ok = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| matches(&format!("Bearer {token}"), v));
        let cookie = read_cookie(&parts.headers, SESSION_COOKIE);
        let cookie_ok = verify_session(Some(token), cookie.as_deref());

        if bearer_ok || cookie_ok {
            Ok(DataAccess)
        } else {
            Err(ApiError::Unauthorized("Invalid or missing token".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for CookieSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = configured_token(state)?;
        let cookie = read_cookie(&parts.headers, SESSION_COOKIE);

        if verify_session(Some(token), cookie.as_deref()) {
            Ok(CookieSession)
        } else {
            tracing::warn!("Rejected write request without a valid session cookie");
            Err(ApiError::Unauthorized(
                "Unauthorized: missing or bad auth cookie".to_string(),
            ))
        }
    }
}

// No token configured means nobody can authenticate, not everybody.
fn configured_token(state: &AppState) -> Result<&str, ApiError> {
    state
        .config
        .session_token()
        .ok_or_else(|| ApiError::Misconfigured("Server misconfigured".to_string()))
}
