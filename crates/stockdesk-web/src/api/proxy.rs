use axum::extract::State;
use axum::Json;
use reqwest::header::CACHE_CONTROL;
use stockdesk_core::interpret_feed_body;

use crate::auth::middleware::DataAccess;
use crate::error::ApiError;
use crate::state::AppState;

/// A read-only spreadsheet feed relayed to authenticated clients.
pub struct Feed {
    /// Primary setting name, reported when the URL is missing.
    pub setting: &'static str,
    /// Prefix of the error relayed with a non-2xx upstream status.
    pub failure_prefix: &'static str,
    /// Client-facing message for transport failures.
    pub unavailable: &'static str,
}

pub const INVENTORY: Feed = Feed {
    setting: "GOOGLE_SHEET_URL",
    failure_prefix: "Sheets fetch failed",
    unavailable: "Failed to fetch inventory",
};

pub const PURCHASES: Feed = Feed {
    setting: "purchase_sheet",
    failure_prefix: "Sheets fetch failed",
    unavailable: "Failed to fetch purchase data",
};

pub const STATEMENT: Feed = Feed {
    setting: "google_sheet_statement",
    failure_prefix: "Sheets fetch failed",
    unavailable: "Failed to fetch statement data",
};

pub const SALES: Feed = Feed {
    setting: "SALES_FEED_URL",
    failure_prefix: "Sales feed failed",
    unavailable: "Failed to fetch sales feed",
};

pub async fn inventory(
    _access: DataAccess,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    relay_feed(&state, state.config.upstream.inventory_url.as_deref(), &INVENTORY).await
}

pub async fn purchases(
    _access: DataAccess,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    relay_feed(&state, state.config.upstream.purchases_url.as_deref(), &PURCHASES).await
}

pub async fn statement(
    _access: DataAccess,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    relay_feed(&state, state.config.upstream.statement_url.as_deref(), &STATEMENT).await
}

/// Fetches `url` once and relays its body.
///
/// Non-2xx statuses are passed through with an error body; successful
/// bodies go through [`interpret_feed_body`].
pub async fn relay_feed(
    state: &AppState,
    url: Option<&str>,
    feed: &Feed,
) -> Result<Json<serde_json::Value>, ApiError> {
    let url = url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::Misconfigured(format!("{} is not set", feed.setting)))?;

    let unavailable = |cause: reqwest::Error| ApiError::Internal {
        message: feed.unavailable.to_string(),
        cause: cause.to_string(),
    };

    let response = state
        .http
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(unavailable)?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Upstream feed {} returned {}", feed.setting, status);
        return Err(ApiError::UpstreamStatus {
            status,
            error: format!("{}: {}", feed.failure_prefix, status.as_u16()),
        });
    }

    let text = response.text().await.map_err(unavailable)?;
    Ok(Json(interpret_feed_body(&text)))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
