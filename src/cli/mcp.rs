//! MCP server launcher
//!
//! Starts the MCP server over stdio.

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

use crate::config::Config;
use crate::mcp::DevToolsServer;

/// Run the MCP server over stdio.
///
/// stdout carries the protocol, so all logging must go to stderr.
///
/// # Returns
/// * `Ok(())` - Server ran successfully and was shut down
/// * `Err(e)` - Server failed to start or encountered an error
pub async fn run_mcp_server(config: Config) -> Result<()> {
    tracing::info!(
        "Starting nextflow-devtools MCP server v{} for {}",
        env!("CARGO_PKG_VERSION"),
        config.project_dir().display()
    );

    let server = DevToolsServer::new(config);

    // Create stdio transport - tuple of (reader, writer)
    let transport = (stdin(), stdout());

    let service = server
        .serve(transport)
        .await
        .context("Failed to start MCP server")?;

    service.waiting().await?;

    tracing::info!("MCP server shut down");
    Ok(())
}
