//! deskmcp - MCP server for the Teamwork Desk helpdesk
//!
//! Runs as an MCP server over stdio so an AI client can read and create
//! tickets, customers, companies, users, tags, ticket statuses and ticket
//! types.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `DESK_API_URL`: Site URL, e.g. `https://acme.teamwork.com`
//! - `DESK_API_TOKEN`: API bearer token
//!
//! # Usage
//!
//! ```bash
//! DESK_API_URL=https://acme.teamwork.com DESK_API_TOKEN=xxx ./deskmcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use deskmcp::{config::Config, desk_client::DeskClient, server::DeskServer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries JSON-RPC; logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deskmcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting deskmcp v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    let desk = DeskClient::new(&config).context("Failed to create helpdesk client")?;

    tracing::debug!(base_url = %desk.base_url(), "Helpdesk client initialized");

    let server = DeskServer::new(desk);

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
