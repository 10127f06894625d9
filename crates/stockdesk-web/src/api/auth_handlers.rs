use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use stockdesk_core::{verify_session, ClientIdentity, LoginDecision};

use crate::auth::cookie::{cleared_session_cookie, read_cookie, session_cookie, SESSION_COOKIE};
use crate::body::{read_limited, BodyReadError};
use crate::dto::{LoginRequest, LoginResponse, LogoutResponse, SessionResponse};
use crate::error::AuthError;
use crate::state::AppState;

const CLIENT_HINT: &str = "sec-ch-ua";
const FORWARDED_FOR: &str = "x-forwarded-for";
const USER_AGENT: &str = "user-agent";

/// Password login.
///
/// Every attempt is counted against the caller's identity before the body is
/// read; only a successful login clears the count.
pub async fn login(State(state): State<AppState>, request: Request) -> Result<Response, AuthError> {
    let (parts, body) = request.into_parts();

    let identity = client_identity(&parts);
    let decision = state.login_guard.admit(&identity, Instant::now());
    if decision.limited {
        return Err(AuthError::RateLimited {
            retry_after: decision.retry_after,
        });
    }

    let raw = read_limited(body, state.config.login.max_body_bytes)
        .await
        .map_err(|e| match e {
            BodyReadError::TooLarge => {
                tracing::warn!("Login body exceeded limit for client: {identity}");
                AuthError::PayloadTooLarge
            }
            BodyReadError::Stream(e) => AuthError::Internal(format!("Failed to read login body: {e}")),
        })?;
    let request = LoginRequest::from_body(&raw);

    let Some(token) = state.config.session_token() else {
        tracing::error!("Login attempted but no session token is configured");
        return Err(AuthError::Misconfigured);
    };

    match state
        .login_guard
        .verify(&identity, state.config.admin_password(), request.password())
    {
        LoginDecision::Authenticated => Ok((
            [(header::SET_COOKIE, session_cookie(token))],
            Json(LoginResponse {
                success: true,
                message: "Authentication successful",
            }),
        )
            .into_response()),
        LoginDecision::InvalidCredentials => Err(AuthError::InvalidCredentials),
        LoginDecision::Misconfigured => Err(AuthError::Misconfigured),
    }
}

/// Reports whether the session cookie is still valid.
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AuthError> {
    let token = state.config.session_token().ok_or(AuthError::Misconfigured)?;
    let cookie = read_cookie(&headers, SESSION_COOKIE);

    let authenticated = verify_session(Some(token), cookie.as_deref());
    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    Ok((
        status,
        Json(SessionResponse {
            success: authenticated,
            authenticated,
        }),
    )
        .into_response())
}

pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, cleared_session_cookie())],
        Json(LogoutResponse { success: true }),
    )
        .into_response()
}

pub async fn method_not_allowed() -> AuthError {
    AuthError::MethodNotAllowed
}

fn client_identity(parts: &Parts) -> ClientIdentity {
    let value = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    ClientIdentity::from_parts(
        value(FORWARDED_FOR),
        peer,
        value(USER_AGENT),
        value(CLIENT_HINT),
    )
}
