//! Standalone registry proxy CLI binary

use anyhow::Result;
use clap::{Parser, Subcommand};
use docker_registry_proxy::{client_ops, server, ProxyConfig, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "registry-proxy")]
#[command(about = "Transparent proxy for a container image registry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the proxy in the foreground
    Serve {
        /// Host to bind to
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Origin registry base URL to challenge and forward against
        #[arg(long)]
        origin: Option<String>,

        /// Mirror registry base URL for short-path redirects
        #[arg(long)]
        mirror: Option<String>,
    },

    /// Check whether a running proxy is answering
    Status {
        /// Proxy URL
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            origin,
            mirror,
        } => {
            let mut config = ProxyConfig::default();
            if let Some(origin) = origin {
                config.origin_registry_url = origin;
            }
            if let Some(mirror) = mirror {
                config.mirror_registry_url = mirror;
            }
            server::run_server(host, port, config).await
        }

        Commands::Status { server } => client_ops::show_status(&server).await,
    }
}
