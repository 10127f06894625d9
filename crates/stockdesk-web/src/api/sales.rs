use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use stockdesk_core::{detect_upstream_failure, upstream_error_details, SaleRequest};

use super::proxy::{relay_feed, SALES};
use crate::auth::middleware::{CookieSession, DataAccess};
use crate::dto::SaleSubmitResponse;
use crate::error::ApiError;
use crate::state::AppState;

const SUBMIT_TOKEN_HEADER: &str = "x-token";
const UNAUTHORIZED_HINT: &str = "Sales endpoint responded with 401 (unauthorized). \
     Check that SALES_SUBMIT_TOKEN matches the upstream expectation.";

pub async fn sales_feed(
    _access: DataAccess,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    relay_feed(&state, state.config.upstream.sales_feed_url.as_deref(), &SALES).await
}

/// Validates a sale and forwards it to the spreadsheet write endpoint.
pub async fn submit_sale(
    _session: CookieSession,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaleSubmitResponse>, ApiError> {
    let upstream_config = &state.config.upstream;
    let submit_token = upstream_config
        .sales_submit_token
        .as_deref()
        .filter(|t| !t.is_empty());

    let payload = SaleRequest::from_body(&body).normalize(submit_token, Utc::now())?;

    let url = upstream_config
        .sales_submit_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::Misconfigured("Sales submission endpoint not configured".to_string()))?;

    let internal = |cause: reqwest::Error| ApiError::Internal {
        message: "Internal server error".to_string(),
        cause: format!("Sale submission failed: {cause}"),
    };

    let mut request = state.http.post(url).json(&payload);
    if let Some(token) = submit_token {
        request = request.header(SUBMIT_TOKEN_HEADER, token);
    }
    let response = request.send().await.map_err(internal)?;
    let status = response.status();
    let text = response.text().await.map_err(internal)?;

    let parsed: Option<serde_json::Value> = if text.is_empty() {
        None
    } else {
        serde_json::from_str(&text).ok()
    };

    if !status.is_success() {
        let details = upstream_error_details(parsed.as_ref(), &text);
        tracing::error!("Sales submit error: {} {}", status, details);
        return Err(ApiError::BadGateway {
            error: format!("Upstream failed {}", status.as_u16()),
            details: Some(details),
            hint: (status == reqwest::StatusCode::UNAUTHORIZED).then(|| UNAUTHORIZED_HINT.to_string()),
        });
    }

    match parsed {
        Some(body) if body.is_object() || body.is_array() => {
            if let Some(message) = detect_upstream_failure(&body) {
                tracing::error!("Sales submit reported failure despite {}: {}", status, body);
                return Err(ApiError::BadGateway {
                    error: message,
                    details: Some(body),
                    hint: None,
                });
            }
            tracing::info!("Sale recorded for sku {}", payload.sku);
            Ok(Json(SaleSubmitResponse::Data {
                success: true,
                data: body,
            }))
        }
        _ => {
            tracing::info!("Sale recorded for sku {}", payload.sku);
            Ok(Json(SaleSubmitResponse::Message {
                success: true,
                message: text,
            }))
        }
    }
}
