//! Outbound HTTP client for the origin registry and the token endpoint.

use crate::error::{AppError, AppResult};
use crate::types::ProxyConfig;
use axum::http::{header, HeaderMap, Method, StatusCode};
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

/// A buffered upstream response, ready to be relayed to the caller.
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// HTTP client for upstream communication.
///
/// Wraps a [`reqwest::Client`] configured from [`ProxyConfig`] and exposes the
/// three outbound calls the proxy makes: fetching the origin's auth challenge,
/// relaying a token request, and transparently forwarding a registry API call.
/// Redirects are followed on every outbound call; failures surface as
/// [`AppError::UpstreamUnavailable`] and are never retried.
pub struct UpstreamClient {
    client: Client,
    config: ProxyConfig,
}

impl UpstreamClient {
    /// Create a new upstream client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: ProxyConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("docker-registry-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Fetch the origin registry's API-root challenge.
    ///
    /// The caller replaces the response headers wholesale, so only status and
    /// body matter here.
    pub async fn fetch_challenge(&self) -> AppResult<UpstreamResponse> {
        let url = format!("{}/v2/", self.config.origin_registry_url);
        debug!(url = %url, "Fetching origin registry challenge");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach origin registry");
            AppError::UpstreamUnavailable(format!("origin registry unreachable: {e}"))
        })?;

        Self::buffer_response(response).await
    }

    /// Relay a token request to the external token endpoint.
    ///
    /// Only `service` and `scope` are sent; no other inbound query parameters
    /// are copied. The response is returned verbatim for pass-through.
    pub async fn fetch_token(&self, scope: &str) -> AppResult<UpstreamResponse> {
        debug!(url = %self.config.token_auth_url, scope = %scope, "Relaying token request");

        let response = self
            .client
            .get(&self.config.token_auth_url)
            .query(&[
                ("service", self.config.token_service.as_str()),
                ("scope", scope),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach token endpoint");
                AppError::UpstreamUnavailable(format!("token endpoint unreachable: {e}"))
            })?;

        Self::buffer_response(response).await
    }

    /// Forward a registry API call to the origin with the inbound method,
    /// path, and headers. The inbound query string and body are not forwarded;
    /// pull traffic is GET/HEAD and the origin keys everything off the path.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
    ) -> AppResult<UpstreamResponse> {
        let url = format!("{}{}", self.config.origin_registry_url, path);
        debug!(method = %method, url = %url, "Forwarding request to origin registry");

        let mut outbound = headers.clone();
        // The outbound request addresses a different host and carries no
        // body, so the inbound routing headers must not travel with it.
        outbound.remove(header::HOST);
        outbound.remove(header::CONTENT_LENGTH);
        outbound.remove(header::TRANSFER_ENCODING);
        outbound.remove(header::CONNECTION);

        let response = self
            .client
            .request(method, &url)
            .headers(outbound)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach origin registry");
                AppError::UpstreamUnavailable(format!("origin registry unreachable: {e}"))
            })?;

        Self::buffer_response(response).await
    }

    /// Buffer an upstream response into status, headers, and body.
    async fn buffer_response(response: reqwest::Response) -> AppResult<UpstreamResponse> {
        let status = response.status();
        let mut headers = response.headers().clone();
        // The transfer encoding has already been decoded into the buffered
        // body; relaying these headers would describe a framing that no
        // longer exists.
        headers.remove(header::TRANSFER_ENCODING);
        headers.remove(header::CONNECTION);

        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read upstream response body");
            AppError::UpstreamUnavailable(format!("upstream body read failed: {e}"))
        })?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
