use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pds_mcp::{McpHttpServer, resolve_bind_address, serve_stdio};
use pds_registry::RegistryClient;
use tracing::info;

/// MCP server exposing NASA's PDS Registry search API.
#[derive(Parser, Debug)]
#[command(name = "pds-mcp-server", version, about)]
struct Cli {
    /// Serve over a local streamable-HTTP endpoint instead of stdio.
    #[arg(long)]
    http: bool,

    /// Bind address for the HTTP endpoint. Must be a loopback address;
    /// port 0 picks a free port.
    #[arg(long, default_value = "127.0.0.1:0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let registry = Arc::new(RegistryClient::from_env()?);
    info!(base_url = registry.base_url(), "PDS Registry client ready");

    if cli.http {
        let bind_address = resolve_bind_address(Some(&cli.bind))?;
        let running = McpHttpServer::new(bind_address, registry).start().await?;
        info!(address = %running.bound_address(), "MCP HTTP server listening at /mcp");
        tokio::signal::ctrl_c().await?;
        running.stop().await
    } else {
        serve_stdio(registry).await
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    // stdout carries the MCP stdio transport; logs must go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
