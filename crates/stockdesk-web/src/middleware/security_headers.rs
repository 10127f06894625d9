//! Response hardening for the JSON API.

use axum::body::Body;
use axum::http::{header::HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Sent on every response. Bodies carry session state or sheet data and must not be cached.
const API_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("cache-control", "no-store"),
];

const HSTS: (&str, &str) = ("strict-transport-security", "max-age=31536000; includeSubDomains");

fn harden(response: &mut Response, hsts: bool) {
    let headers = response.headers_mut();
    for (name, value) in API_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    if hsts {
        headers.insert(HSTS.0, HeaderValue::from_static(HSTS.1));
    }
}

pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    harden(&mut response, false);
    response
}

/// Same as [`security_headers`], plus HSTS. Only layered when serving TLS.
pub async fn security_headers_with_hsts(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    harden(&mut response, true);
    response
}
