//! Report handler implementations
//!
//! Each handler applies defaults, issues exactly one backend call and
//! flattens the response into a [`ReportTable`]. Failures come back as
//! [`AnalyticsError`]; [`respond`] turns either outcome into a tool result.

use std::sync::Arc;

use mcp_common::{json_success, text_error, CallToolResult, McpError};
use tracing::{info, warn};

use crate::analytics::{AnalyticsBackend, AnalyticsError, AnalyticsResult};
use crate::catalog::ReportKind;
use crate::config::Config;
use crate::params::{DateRangeParams, EventParams, RealtimeParams, ReportParams};
use crate::types::{RealtimeRequest, ReportRequest, ReportTable};

/// What every handler needs: read-only config and the backend
#[derive(Clone)]
pub struct ReportContext {
    pub config: Arc<Config>,
    pub backend: Arc<dyn AnalyticsBackend>,
}

impl ReportContext {
    pub fn new(config: Config, backend: Arc<dyn AnalyticsBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    async fn run(&self, kind: ReportKind, request: ReportRequest) -> AnalyticsResult<ReportTable> {
        info!(
            tool = kind.tool_name(),
            property = %request.property,
            start = %request.date_range.start_date,
            end = %request.date_range.end_date,
            "running report"
        );
        let header = request.header();
        let response = self.backend.run_report(&request).await?;
        Ok(response.into_table(header, request.dimensions.len()))
    }
}

/// Encode a handler outcome as a tool result
///
/// Backend failures are flagged tool errors, never protocol errors.
pub fn respond(
    kind: ReportKind,
    outcome: AnalyticsResult<ReportTable>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(table) => json_success(&table),
        Err(e) => {
            warn!(tool = kind.tool_name(), error = %e, "report failed");
            Ok(text_error(kind.error_text(e)))
        }
    }
}

/// Caller-defined dimensions and metrics over a date range
pub async fn custom_report(
    ctx: &ReportContext,
    kind: ReportKind,
    params: ReportParams,
) -> AnalyticsResult<ReportTable> {
    let request = ReportRequest {
        property: ctx.config.analytics.property_resource(params.property_id)?,
        dimensions: params.dimensions.unwrap_or_default(),
        metrics: params.metrics,
        date_range: ctx
            .config
            .reports
            .date_range(params.start_date, params.end_date),
        event_filter: None,
    };
    ctx.run(kind, request).await
}

/// Current activity; no date range
pub async fn realtime_report(
    ctx: &ReportContext,
    params: RealtimeParams,
) -> AnalyticsResult<ReportTable> {
    let request = RealtimeRequest {
        property: ctx.config.analytics.property_resource(params.property_id)?,
        metrics: ctx.config.reports.realtime_metrics(params.metrics),
    };
    info!(
        tool = ReportKind::Realtime.tool_name(),
        property = %request.property,
        metrics = ?request.metrics,
        "running real-time report"
    );
    let header = request.header();
    let response = ctx.backend.run_realtime_report(&request).await?;
    Ok(response.into_table(header, 0))
}

/// Reports with a fixed dimension/metric set
pub async fn canned_report(
    ctx: &ReportContext,
    kind: ReportKind,
    params: DateRangeParams,
) -> AnalyticsResult<ReportTable> {
    let request = fixed_request(ctx, kind, params)?;
    ctx.run(kind, request).await
}

/// Fixed event report filtered to one event name
pub async fn event_report(
    ctx: &ReportContext,
    kind: ReportKind,
    params: EventParams,
) -> AnalyticsResult<ReportTable> {
    let mut request = fixed_request(ctx, kind, params.range)?;
    request.event_filter = Some(params.event);
    ctx.run(kind, request).await
}

fn fixed_request(
    ctx: &ReportContext,
    kind: ReportKind,
    params: DateRangeParams,
) -> Result<ReportRequest, AnalyticsError> {
    Ok(ReportRequest {
        property: ctx.config.analytics.property_resource(params.property_id)?,
        dimensions: kind.fixed_dimensions(),
        metrics: kind.fixed_metrics(),
        date_range: ctx
            .config
            .reports
            .date_range(params.start_date, params.end_date),
        event_filter: None,
    })
}
