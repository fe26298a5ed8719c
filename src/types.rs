//! Type definitions for the registry proxy service

use std::time::Duration;

/// Configuration for the registry proxy.
///
/// This struct defines the two upstream hosts the proxy talks about and the
/// settings for outbound HTTP calls. It is passed into the router at
/// construction time so tests can point the proxy at mock hosts.
///
/// # Fields
///
/// * `origin_registry_url` - Origin registry the proxy challenges and forwards
///   pulls against (default: "https://registry-1.docker.io")
/// * `mirror_registry_url` - Mirror registry that short-form image paths are
///   redirected to (default: "https://mirror.gcr.io")
/// * `token_auth_url` - External token-issuance endpoint
///   (default: "https://auth.docker.io/token")
/// * `token_service` - `service` query value sent to the token endpoint
/// * `timeout` - HTTP request timeout for outbound calls
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Origin registry base URL for challenges and transparent forwarding
    pub origin_registry_url: String,
    /// Mirror registry base URL for short-path redirects
    pub mirror_registry_url: String,
    /// Token-issuance endpoint URL
    pub token_auth_url: String,
    /// Service identifier sent to the token endpoint
    pub token_service: String,
    /// HTTP request timeout for outbound calls
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            origin_registry_url: "https://registry-1.docker.io".to_string(),
            mirror_registry_url: "https://mirror.gcr.io".to_string(),
            token_auth_url: "https://auth.docker.io/token".to_string(),
            token_service: "registry.docker.io".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}
