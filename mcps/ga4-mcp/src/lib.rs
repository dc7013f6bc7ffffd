//! GA4 MCP Library
//!
//! Read-only Google Analytics 4 reporting tools over MCP.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use ga4_mcp::{Config, Ga4McpServer};
//! use mcp_common::EmbeddableMcp;
//!
//! let server = Ga4McpServer::from_config(Config::load()?)?;
//! let result = server
//!     .call_tool("get_traffic_sources", serde_json::json!({ "startDate": "7daysAgo" }))
//!     .await?;
//! ```
//!
//! # Tools
//! - Custom reports: `query_analytics`, `get_custom_report`
//! - Real-time: `get_realtime_data`
//! - Canned: `get_traffic_sources`, `get_user_demographics`, `get_page_performance`
//! - Events: `get_key_event_data`, `get_conversion_data`
//!
//! # Configuration
//! Set `GA_PROPERTY_ID` (default property) and either `GA_ACCESS_TOKEN` or
//! `GOOGLE_APPLICATION_CREDENTIALS` for the `gcloud` credential helper.
//! Optional file: `~/.ga4-mcp/config.toml`.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod params;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::Ga4McpServer;

pub use analytics::{AccessTokenSource, AnalyticsBackend, AnalyticsError, DataApiBackend};
pub use catalog::ReportKind;
pub use config::Config;
pub use types::{DateRange, RealtimeRequest, ReportRequest, ReportTable};

// Re-export parameter types for direct API usage
pub use params::*;
