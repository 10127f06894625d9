//! HTTP layer of the stockdesk inventory admin service.
//!
//! Routes live under `/api`: password login with a session cookie, session
//! checks and logout, plus authenticated relays to the spreadsheet backend.

pub mod api;
pub mod auth;
pub mod body;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Ceiling for request bodies on the data routes. Login reads its own body
/// after counting the attempt, so it is not wrapped by this layer.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Builds the full application router around `state`.
pub fn app(state: AppState) -> Router {
    let data_routes = api::data_router().layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES));
    let base_router = Router::new().nest("/api", api::auth_router().merge(data_routes));

    let base_router = if state.config.tls_enabled() {
        base_router.layer(from_fn(middleware::security_headers::security_headers_with_hsts))
    } else {
        base_router.layer(from_fn(middleware::security_headers::security_headers))
    };

    base_router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
