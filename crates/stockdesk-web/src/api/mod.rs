mod auth_handlers;
pub mod proxy;
pub mod sales;

use axum::routing::{get, post, MethodRouter};
use axum::Router;

use crate::state::AppState;

/// Login, session and logout. Wrong methods answer in the `{success, message}` shape.
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", login_route())
        .route("/auth", login_route())
        .route(
            "/session",
            get(auth_handlers::session).fallback(auth_handlers::method_not_allowed),
        )
        .route(
            "/logout",
            post(auth_handlers::logout).fallback(auth_handlers::method_not_allowed),
        )
}

fn login_route() -> MethodRouter<AppState> {
    post(auth_handlers::login).fallback(auth_handlers::method_not_allowed)
}

/// Spreadsheet-backed data endpoints. Wrong methods answer in the `{error}` shape.
pub fn data_router() -> Router<AppState> {
    Router::new()
        .route(
            "/inventory",
            get(proxy::inventory).fallback(proxy::method_not_allowed),
        )
        .route(
            "/purchases",
            get(proxy::purchases).fallback(proxy::method_not_allowed),
        )
        .route(
            "/statement",
            get(proxy::statement).fallback(proxy::method_not_allowed),
        )
        .route(
            "/sales",
            get(sales::sales_feed)
                .post(sales::submit_sale)
                .fallback(proxy::method_not_allowed),
        )
}
