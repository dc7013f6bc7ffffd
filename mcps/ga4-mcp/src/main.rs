//! GA4 MCP Server
//!
//! Exposes read-only Google Analytics 4 reports as MCP tools over stdio.
//!
//! # Requirements
//! - `GA_PROPERTY_ID` for the default property (or `propertyId` on each call)
//! - `GA_ACCESS_TOKEN`, or the Google Cloud CLI with Application Default
//!   Credentials (`GOOGLE_APPLICATION_CREDENTIALS`)
//!
//! # Usage
//!
//! Configure in `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "ga4": {
//!       "command": "ga4-mcp",
//!       "env": { "GA_PROPERTY_ID": "123456789" }
//!     }
//!   }
//! }
//! ```
//!
//! Set `GA4_MCP_QUIET=1` to keep startup diagnostics out of the client's log.

use ga4_mcp::{Config, Ga4McpServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    mcp_common::init_tracing("ga4_mcp", config.server.quiet_startup)?;

    tracing::info!("Starting GA4 MCP Server");
    if let Some(path) = &config.source {
        tracing::info!("Loaded config from: {}", path.display());
    }
    match &config.analytics.property_id {
        Some(id) => tracing::info!("Default property: {}", id),
        None => tracing::warn!("GA_PROPERTY_ID is not set; every call must pass propertyId"),
    }

    let server = Ga4McpServer::from_config(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
