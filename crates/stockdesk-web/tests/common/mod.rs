//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use stockdesk_web::config::ServerConfig;
use stockdesk_web::state::AppState;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse battery staple";
pub const TOKEN: &str = "0123456789abcdef0123456789abcdef";

/// Config with both secrets set and no upstream URLs.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.admin_password = Some(PASSWORD.to_string());
    config.auth.session_token = Some(TOKEN.to_string());
    config
}

pub fn app(config: ServerConfig) -> Router {
    stockdesk_web::app(AppState::new(config))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn session_cookie() -> String {
    format!("auth={TOKEN}")
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Last request seen by a recording upstream: headers and parsed JSON body.
#[derive(Clone, Default)]
pub struct Recorded(pub Arc<Mutex<Option<(HeaderMap, Value)>>>);

impl Recorded {
    pub fn take(&self) -> (HeaderMap, Value) {
        self.0.lock().unwrap().take().expect("upstream saw no request")
    }
}
