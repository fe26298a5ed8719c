//! Common test utilities and helpers
//!
//! Spins up mock upstream servers on ephemeral ports so the proxy's outbound
//! calls can be exercised end to end without touching real registries.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header, HeaderMap, HeaderName, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use docker_registry_proxy::ProxyConfig;
use serde_json::json;
use tokio::net::TcpListener;

/// Serve a router on an ephemeral port in the background, returning its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind ephemeral port");
    let addr = listener.local_addr().expect("should read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server failed");
    });

    format!("http://{addr}")
}

/// A base URL that nothing is listening on.
pub async fn unreachable_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind ephemeral port");
    let addr = listener.local_addr().expect("should read local addr");
    drop(listener);

    format!("http://{addr}")
}

/// Proxy configuration pointed at mock upstream hosts.
pub fn test_config(origin_url: &str, auth_url: &str) -> ProxyConfig {
    ProxyConfig {
        origin_registry_url: origin_url.to_string(),
        mirror_registry_url: "https://mirror.example.com".to_string(),
        token_auth_url: format!("{auth_url}/token"),
        ..ProxyConfig::default()
    }
}

/// A mock origin registry: an unauthorized challenge at `/v2/`, one manifest
/// route that echoes the credentials it saw, and a fallback echoing the
/// request line.
pub fn mock_origin() -> Router {
    Router::new()
        .route("/v2/", get(origin_challenge))
        .route("/v2/library/redis/manifests/latest", get(origin_manifest))
        .fallback(origin_echo)
}

async fn origin_challenge() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::WWW_AUTHENTICATE,
                "Bearer realm=\"https://origin.invalid/token\",service=\"origin\"",
            ),
            (
                HeaderName::from_static("docker-distribution-api-version"),
                "registry/2.0",
            ),
        ],
        r#"{"errors":[{"code":"UNAUTHORIZED","message":"authentication required"}]}"#,
    )
}

async fn origin_manifest(headers: HeaderMap) -> impl IntoResponse {
    let seen_authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    (
        [
            (
                HeaderName::from_static("docker-content-digest"),
                "sha256:deadbeef".to_string(),
            ),
            (
                HeaderName::from_static("x-echo-authorization"),
                seen_authorization,
            ),
        ],
        Json(json!({
            "schemaVersion": 2,
            "mediaType": "application/vnd.docker.distribution.manifest.v2+json"
        })),
    )
}

async fn origin_echo(uri: Uri) -> Json<serde_json::Value> {
    Json(json!({
        "path": uri.path(),
        "query": uri.query().unwrap_or(""),
    }))
}

/// A mock token endpoint that reflects the query parameters it received.
pub fn mock_auth() -> Router {
    Router::new().route("/token", get(token_endpoint))
}

async fn token_endpoint(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    Json(json!({
        "token": "mock-token",
        "scope": params.get("scope"),
        "service": params.get("service"),
        "param_count": params.len(),
    }))
}
