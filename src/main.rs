//! MCP server entrypoint (stdio transport).
//!
//! Launches an MCP server that exposes memegen templates and meme URL generation over stdio for
//! editor and agent integrations. Logs go to stderr so stdout stays reserved for the protocol.
use anyhow::{Context, Result};
use memegen_mcp::{config, logging, mcp::MemegenMcpServer, memegen::MemegenClient};
use rmcp::{service::ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::init_config().context("failed to load configuration")?;
    logging::init_tracing(config.log_file.as_deref());
    tracing::debug!(
        api_base_url = %config.api_base_url,
        log_file = ?config.log_file,
        "Loaded configuration"
    );

    let client = MemegenClient::new().context("failed to build memegen HTTP client")?;
    let server = MemegenMcpServer::new(client);
    tracing::info!(api_base_url = %config.api_base_url, "MemeGen MCP server running on stdio");

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    Ok(())
}
