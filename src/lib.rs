//! # Docker Registry Proxy
//!
//! A transparent HTTP proxy that fronts a container image registry. Clients
//! authenticate against the proxy instead of the origin, image pulls are
//! forwarded to the origin untouched, and short-form image paths are
//! redirected to a secondary mirror host.
//!
//! ## Features
//!
//! - **Challenge rewriting**: The origin's `/v2/` discovery response is
//!   relayed with a `WWW-Authenticate` header pointing at this proxy
//! - **Token relay**: `/auth/token` forwards to the external token endpoint,
//!   prepending the `library/` namespace to bare image names in `scope`
//! - **Transparent forwarding**: manifest, blob, and general registry API
//!   calls pass through to the origin with the caller's method and headers
//! - **Mirror redirects**: five-segment short paths get a 301 to the mirror
//!   host with the `library` namespace segment inserted
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docker_registry_proxy::{server, ProxyConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Start the proxy with default upstream hosts
//! server::run_server("0.0.0.0".to_string(), 5000, ProxyConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client_ops;
pub mod error;
pub mod routing;
pub mod scope;
pub mod server;
pub mod types;
pub mod ui;
pub mod upstream;

// Re-export main types
pub use error::{AppError, AppResult};
pub use types::ProxyConfig;

// Re-export server functions
pub use server::{build_router, run_server};

// Re-export client operations for CLI
pub use client_ops::{check_server_running, show_status};

/// Default port for the registry proxy
pub const DEFAULT_PORT: u16 = 5000;

/// Default host for the registry proxy
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Registry proxy service name for logging and process management
pub const SERVICE_NAME: &str = "docker-registry-proxy";

/// Service identifier embedded in the rewritten auth challenge
pub const CHALLENGE_SERVICE: &str = "docker-proxy-worker";
