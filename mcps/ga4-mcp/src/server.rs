//! MCP Server implementation
//!
//! This module defines the main MCP server that exposes the report catalog
//! as tools. Handler implementations are in the handlers module.

use std::sync::Arc;

use mcp_common::{
    async_trait, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::analytics::{AnalyticsBackend, AnalyticsResult, DataApiBackend};
use crate::catalog::ReportKind;
use crate::config::Config;
use crate::handlers::{self, ReportContext};
use crate::params::*;

pub const SERVER_NAME: &str = "ga4-mcp";

const DESCRIPTION: &str = "Google Analytics 4 MCP Server - read-only reporting tools: custom \
     reports over any dimensions and metrics, real-time active users, traffic sources, user \
     demographics, page performance and key event / conversion counts. Results are JSON \
     objects with a `header` array and a `rows` array of string cells.";

/// The main GA4 MCP Server
#[derive(Clone)]
pub struct Ga4McpServer {
    ctx: ReportContext,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl Ga4McpServer {
    pub fn new(config: Config, backend: Arc<dyn AnalyticsBackend>) -> Self {
        Self {
            ctx: ReportContext::new(config, backend),
            tool_router: Self::tool_router(),
        }
    }

    /// Server backed by the live data API
    pub fn from_config(config: Config) -> AnalyticsResult<Self> {
        let backend = DataApiBackend::from_config(&config.analytics)?;
        tracing::info!(
            "Using {} at {}",
            backend.name(),
            backend.base_url()
        );
        Ok(Self::new(config, Arc::new(backend)))
    }

    // ========================================================================
    // Custom Reports
    // ========================================================================

    #[tool(
        description = "Query Google Analytics 4 data for the given dimensions, metrics and date range. The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn query_analytics(
        &self,
        Parameters(params): Parameters<ReportParams>,
    ) -> Result<CallToolResult, McpError> {
        self.custom(ReportKind::QueryAnalytics, params).await
    }

    #[tool(
        description = "Get a custom Google Analytics 4 report for the given dimensions, metrics and date range. Same as query_analytics. The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_custom_report(
        &self,
        Parameters(params): Parameters<ReportParams>,
    ) -> Result<CallToolResult, McpError> {
        self.custom(ReportKind::CustomReport, params).await
    }

    // ========================================================================
    // Real-time
    // ========================================================================

    #[tool(
        description = "Get real-time data (default metric: activeUsers) for a Google Analytics 4 property. The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_realtime_data(
        &self,
        Parameters(params): Parameters<RealtimeParams>,
    ) -> Result<CallToolResult, McpError> {
        params.validate()?;
        handlers::respond(
            ReportKind::Realtime,
            handlers::realtime_report(&self.ctx, params).await,
        )
    }

    // ========================================================================
    // Canned Reports
    // ========================================================================

    #[tool(
        description = "Get traffic sources (channel group, source, medium) with sessions and total users. The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_traffic_sources(
        &self,
        Parameters(params): Parameters<DateRangeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.canned(ReportKind::TrafficSources, params).await
    }

    #[tool(
        description = "Get user demographics (country, city, device category) with total and new users. The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_user_demographics(
        &self,
        Parameters(params): Parameters<DateRangeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.canned(ReportKind::UserDemographics, params).await
    }

    #[tool(
        description = "Get page performance (page path, page title) with page views and active users. The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_page_performance(
        &self,
        Parameters(params): Parameters<DateRangeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.canned(ReportKind::PagePerformance, params).await
    }

    // ========================================================================
    // Event Reports
    // ========================================================================

    #[tool(
        description = "Get the key event count for one event name (exact match). The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_key_event_data(
        &self,
        Parameters(params): Parameters<KeyEventParams>,
    ) -> Result<CallToolResult, McpError> {
        self.event(ReportKind::KeyEvents, params.into()).await
    }

    #[tool(
        description = "Get the conversion count for one conversion event name (exact match). The property ID is optional and defaults to the configured GA_PROPERTY_ID."
    )]
    async fn get_conversion_data(
        &self,
        Parameters(params): Parameters<ConversionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.event(ReportKind::Conversions, params.into()).await
    }
}

impl Ga4McpServer {
    async fn custom(
        &self,
        kind: ReportKind,
        params: ReportParams,
    ) -> Result<CallToolResult, McpError> {
        params.validate()?;
        handlers::respond(kind, handlers::custom_report(&self.ctx, kind, params).await)
    }

    async fn canned(
        &self,
        kind: ReportKind,
        params: DateRangeParams,
    ) -> Result<CallToolResult, McpError> {
        handlers::respond(kind, handlers::canned_report(&self.ctx, kind, params).await)
    }

    async fn event(&self, kind: ReportKind, params: EventParams) -> Result<CallToolResult, McpError> {
        params.validate()?;
        handlers::respond(kind, handlers::event_report(&self.ctx, kind, params).await)
    }

    fn instructions(&self) -> String {
        match &self.ctx.config.analytics.property_id {
            Some(id) => format!("{} Default property: {}.", DESCRIPTION, id),
            None => format!(
                "{} No default property is configured; pass propertyId on every call.",
                DESCRIPTION
            ),
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for Ga4McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for Ga4McpServer {
    fn server_name(&self) -> &str {
        SERVER_NAME
    }

    fn server_description(&self) -> Option<&str> {
        Some(DESCRIPTION)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        let kind = ReportKind::from_tool_name(name)
            .ok_or_else(|| EmbeddableError::ToolNotFound(name.to_string()))?;

        let result = match kind {
            ReportKind::QueryAnalytics | ReportKind::CustomReport => {
                self.custom(kind, serde_json::from_value(params)?).await
            }
            ReportKind::Realtime => {
                self.get_realtime_data(Parameters(serde_json::from_value(params)?))
                    .await
            }
            ReportKind::TrafficSources
            | ReportKind::UserDemographics
            | ReportKind::PagePerformance => {
                self.canned(kind, serde_json::from_value(params)?).await
            }
            ReportKind::KeyEvents => {
                let params: KeyEventParams = serde_json::from_value(params)?;
                self.event(kind, params.into()).await
            }
            ReportKind::Conversions => {
                let params: ConversionParams = serde_json::from_value(params)?;
                self.event(kind, params.into()).await
            }
        };

        result.map_err(Into::into)
    }
}
