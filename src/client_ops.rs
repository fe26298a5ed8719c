//! Client operations for registry proxy CLI commands

use anyhow::Result;
use colored::Colorize;
use tracing::debug;

/// Check if a registry proxy is answering at the given URL.
pub async fn check_server_running(server_url: &str) -> bool {
    debug!(server = %server_url, "Checking proxy availability");
    match reqwest::get(server_url).await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Show the status of a running registry proxy.
pub async fn show_status(server_url: &str) -> Result<()> {
    println!("🐳 Docker Registry Proxy Status");
    println!();

    if check_server_running(server_url).await {
        println!("  Status: {}", "Running".bright_green());
        println!();
        let discovery_url = format!("{}/v2/", server_url.trim_end_matches('/'));
        println!("🌐 Service URLs:");
        println!("  Help page: {}", server_url.bright_cyan());
        println!("  Discovery: {}", discovery_url.bright_cyan());
        println!();
        println!("💡 Usage:");
        println!("  Pull through the proxy: docker pull <proxy-host>/redis");
    } else {
        println!("  Status: {}", "Not running".bright_red());
        println!();
        println!("💡 Start proxy: registry-proxy serve");
    }

    Ok(())
}
