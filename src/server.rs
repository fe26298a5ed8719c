//! HTTP server and request routing for the registry proxy.
//!
//! Four behaviors hang off the router: the help page at `/`, the rewritten
//! auth challenge at `/v2/`, the token relay at `/auth/token`, and a fallback
//! that either redirects short-form image paths to the mirror or forwards the
//! request to the origin registry untouched.

use crate::error::{AppError, AppResult};
use crate::routing::{self, Route};
use crate::types::ProxyConfig;
use crate::ui;
use crate::upstream::{UpstreamClient, UpstreamResponse};
use crate::{scope, CHALLENGE_SERVICE};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use url::Url;

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: Arc<ProxyConfig>,
    upstream: Arc<UpstreamClient>,
}

/// Query parameters for the token endpoint
#[derive(Debug, Deserialize)]
struct TokenQuery {
    scope: Option<String>,
}

/// Build the proxy router for the given configuration.
pub fn build_router(config: ProxyConfig) -> AppResult<Router> {
    let state = AppState {
        upstream: Arc::new(UpstreamClient::new(config.clone())?),
        config: Arc::new(config),
    };

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/v2/", get(challenge_handler))
        .route("/auth/token", get(token_handler))
        .fallback(proxy_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the registry proxy in the foreground.
pub async fn run_server(host: String, port: u16, config: ProxyConfig) -> Result<()> {
    info!(
        origin = %config.origin_registry_url,
        mirror = %config.mirror_registry_url,
        "Starting registry proxy on {}:{}",
        host,
        port
    );

    let app = build_router(config)?;

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Registry proxy listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Server failed to start")?;

    Ok(())
}

/// Serve the static help page with the requesting host substituted in.
async fn home_handler(headers: HeaderMap) -> Result<Html<String>, AppError> {
    let host = request_host(&headers)?;
    debug!(host = %host, "Serving help page");
    Ok(Html(ui::render_help_page(&host)?))
}

/// Relay the origin's discovery challenge, replacing every response header
/// with a single `WWW-Authenticate` pointing clients at this proxy's token
/// endpoint.
async fn challenge_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let host = request_host(&headers)?;
    let upstream = state.upstream.fetch_challenge().await?;
    info!(host = %host, status = %upstream.status, "Relaying registry challenge");

    let challenge = format!(
        "Bearer realm=\"https://{host}/auth/token\",service=\"{CHALLENGE_SERVICE}\""
    );
    let challenge = HeaderValue::from_str(&challenge)
        .map_err(|e| AppError::InternalError(format!("invalid challenge header: {e}")))?;

    let mut response = (upstream.status, upstream.body).into_response();
    response.headers_mut().clear();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, challenge);
    Ok(response)
}

/// Relay a token request with the scope rewritten to carry the `library/`
/// namespace when the client asked for a bare image name.
async fn token_handler(
    State(state): State<AppState>,
    Query(params): Query<TokenQuery>,
) -> Result<Response, AppError> {
    let scope = params.scope.ok_or(AppError::MissingScope)?;
    let scope = scope::rewrite_scope(&scope);
    debug!(scope = %scope, "Relaying token request");

    let upstream = state.upstream.fetch_token(&scope).await?;
    Ok(relay_response(upstream))
}

/// Fallback for every path the router does not match exactly: short-form
/// image paths become a 301 to the mirror, everything else is forwarded to
/// the origin registry.
async fn proxy_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    match routing::classify(&path) {
        Route::ShortImage => {
            let mut location = Url::parse(&state.config.mirror_registry_url).map_err(|e| {
                AppError::InternalError(format!("invalid mirror registry URL: {e}"))
            })?;
            location.set_path(&routing::namespaced_mirror_path(&path));

            info!(path = %path, location = %location, "Redirecting short image path to mirror");

            let location = HeaderValue::from_str(location.as_str())
                .map_err(|e| AppError::InternalError(format!("invalid redirect target: {e}")))?;
            let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
            response.headers_mut().insert(header::LOCATION, location);
            Ok(response)
        }
        // `/v2/`, `/auth/token` and `/` are matched by the router before the
        // fallback runs; anything reaching this arm is a plain registry API
        // call.
        _ => {
            let upstream = state
                .upstream
                .forward(request.method().clone(), &path, request.headers())
                .await?;
            Ok(relay_response(upstream))
        }
    }
}

/// Pass an upstream response through to the caller verbatim.
fn relay_response(upstream: UpstreamResponse) -> Response {
    let mut response = (upstream.status, upstream.body).into_response();
    *response.headers_mut() = upstream.headers;
    response
}

/// The host the client addressed, taken from the `Host` header.
fn request_host(headers: &HeaderMap) -> AppResult<String> {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or(AppError::MissingHost)
}
