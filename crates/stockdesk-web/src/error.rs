use std::time::Duration;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use stockdesk_core::{describe_wait, retry_after_secs, CoreError};

/// Errors from the login, session and logout endpoints.
///
/// Serialized as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub enum AuthError {
    MethodNotAllowed,
    InvalidCredentials,
    PayloadTooLarge,
    RateLimited { retry_after: Duration },
    Misconfigured,
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_seconds: Option<u64>,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string()),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            AuthError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string()),
            AuthError::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!(
                    "Too many attempts. Please try again in {}.",
                    describe_wait(*retry_after)
                ),
            ),
            AuthError::Misconfigured => (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured".to_string()),
            AuthError::Internal(msg) => {
                // Log the real error server-side, return generic message to client
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let retry_after_seconds = match &self {
            AuthError::RateLimited { retry_after } => Some(retry_after_secs(*retry_after)),
            _ => None,
        };

        let body = AuthErrorBody {
            success: false,
            message,
            retry_after_seconds,
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after_seconds {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Errors from the data proxy and sale submission endpoints.
///
/// Serialized as `{"error": ..., "details"?: ..., "hint"?: ...}`.
#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    BadRequest(String),
    Unauthorized(String),
    /// A required setting is missing; the message names it.
    Misconfigured(String),
    /// Upstream returned a non-2xx status that is relayed as-is.
    UpstreamStatus { status: StatusCode, error: String },
    /// Upstream failed outright or reported a logical failure.
    BadGateway {
        error: String,
        details: Option<serde_json::Value>,
        hint: Option<String>,
    },
    /// Logged with `cause`; the client only sees `message`.
    Internal { message: String, cause: String },
}

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, simple("Method not allowed")),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, simple(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, simple(msg)),
            ApiError::Misconfigured(msg) => {
                tracing::error!("Misconfigured: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, simple(msg))
            }
            ApiError::UpstreamStatus { status, error } => (status, simple(error)),
            ApiError::BadGateway { error, details, hint } => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody { error, details, hint },
            ),
            ApiError::Internal { message, cause } => {
                tracing::error!("{}: {}", message, cause);
                (StatusCode::INTERNAL_SERVER_ERROR, simple(message))
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn simple(error: impl Into<String>) -> ApiErrorBody {
    ApiErrorBody {
        error: error.into(),
        details: None,
        hint: None,
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
