//! Read-only spreadsheet relays against a local stand-in upstream.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::routing::get as get_route;
use axum::{Json, Router};
use serde_json::json;

mod common;

use common::{app, get, get_with_cookie, send, session_cookie, spawn_upstream, test_config, Recorded, TOKEN};

async fn sheet_upstream(recorded: Recorded) -> String {
    let router = Router::new()
        .route(
            "/inventory",
            get_route(move |headers: HeaderMap| {
                let recorded = recorded.clone();
                async move {
                    *recorded.0.lock().unwrap() = Some((headers, serde_json::Value::Null));
                    Json(json!([{ "sku": "A-1", "qty": 3 }]))
                }
            }),
        )
        .route("/purchases", get_route(|| async { Json(json!({ "rows": 2 })) }))
        .route("/statement", get_route(|| async { "not json at all" }))
        .route("/sales", get_route(|| async { "" }))
        .route(
            "/down",
            get_route(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
    spawn_upstream(router).await
}

fn bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn inventory_relays_json_with_bearer_token() {
    let recorded = Recorded::default();
    let base = sheet_upstream(recorded.clone()).await;
    let mut config = test_config();
    config.upstream.inventory_url = Some(format!("{base}/inventory"));
    let app = app(config);

    let res = send(&app, bearer("/api/inventory", TOKEN)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([{ "sku": "A-1", "qty": 3 }]));
    let (headers, _) = recorded.take();
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn session_cookie_also_grants_access() {
    let base = sheet_upstream(Recorded::default()).await;
    let mut config = test_config();
    config.upstream.purchases_url = Some(format!("{base}/purchases"));
    let app = app(config);

    let res = send(&app, get_with_cookie("/api/purchases", &session_cookie())).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "rows": 2 }));
}

#[tokio::test]
async fn missing_or_wrong_credentials_are_rejected() {
    let base = sheet_upstream(Recorded::default()).await;
    let mut config = test_config();
    config.upstream.inventory_url = Some(format!("{base}/inventory"));
    let app = app(config);

    let requests = [
        get("/api/inventory"),
        bearer("/api/inventory", "wrong"),
        bearer("/api/inventory", &format!("{TOKEN}x")),
        get_with_cookie("/api/inventory", "auth=wrong"),
        Request::builder()
            .uri("/api/inventory")
            .header(header::AUTHORIZATION, TOKEN)
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let res = send(&app, request).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body, json!({ "error": "Invalid or missing token" }));
    }
}

#[tokio::test]
async fn unset_token_fails_closed() {
    let mut config = test_config();
    config.auth.session_token = None;
    config.upstream.inventory_url = Some("http://127.0.0.1:9/inventory".to_string());
    let app = app(config);

    let res = send(&app, bearer("/api/inventory", "")).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "error": "Server misconfigured" }));
}

#[tokio::test]
async fn unset_feed_url_names_the_setting() {
    let app = app(test_config());

    for (uri, setting) in [
        ("/api/inventory", "GOOGLE_SHEET_URL"),
        ("/api/purchases", "purchase_sheet"),
        ("/api/statement", "google_sheet_statement"),
        ("/api/sales", "SALES_FEED_URL"),
    ] {
        let res = send(&app, bearer(uri, TOKEN)).await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(res.body, json!({ "error": format!("{setting} is not set") }));
    }
}

#[tokio::test]
async fn upstream_status_is_relayed() {
    let base = sheet_upstream(Recorded::default()).await;
    let mut config = test_config();
    config.upstream.statement_url = Some(format!("{base}/down"));
    config.upstream.sales_feed_url = Some(format!("{base}/down"));
    let app = app(config);

    let res = send(&app, bearer("/api/statement", TOKEN)).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body, json!({ "error": "Sheets fetch failed: 503" }));

    let res = send(&app, bearer("/api/sales", TOKEN)).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body, json!({ "error": "Sales feed failed: 503" }));
}

#[tokio::test]
async fn non_json_and_empty_bodies_are_wrapped() {
    let base = sheet_upstream(Recorded::default()).await;
    let mut config = test_config();
    config.upstream.statement_url = Some(format!("{base}/statement"));
    config.upstream.sales_feed_url = Some(format!("{base}/sales"));
    let app = app(config);

    let res = send(&app, bearer("/api/statement", TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "raw": "not json at all" }));

    let res = send(&app, get_with_cookie("/api/sales", &session_cookie())).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn unreachable_upstream_is_an_internal_error() {
    let mut config = test_config();
    // Port 9 (discard) is not expected to be listening.
    config.upstream.inventory_url = Some("http://127.0.0.1:9/inventory".to_string());
    let app = app(config);

    let res = send(&app, bearer("/api/inventory", TOKEN)).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "error": "Failed to fetch inventory" }));
}

#[tokio::test]
async fn data_routes_reject_other_methods() {
    let app = app(test_config());

    for (method, uri) in [
        (Method::POST, "/api/inventory"),
        (Method::DELETE, "/api/purchases"),
        (Method::PUT, "/api/statement"),
        (Method::PATCH, "/api/sales"),
    ] {
        let req = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();
        let res = send(&app, req).await;
        assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(res.body, json!({ "error": "Method not allowed" }));
    }
}
