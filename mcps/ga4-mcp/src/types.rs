//! Report request and result types
//!
//! [`ReportRequest`] and [`RealtimeRequest`] are fully resolved: every
//! default has already been applied, so backends never see an optional
//! property or date.

use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsError, AnalyticsResult};

/// Dimension the event reports filter on
pub const EVENT_NAME_DIMENSION: &str = "eventName";

/// Turn a property id into its resource name (`properties/<id>`)
///
/// Accepts either a bare id or an id that already carries the prefix. The
/// id ends up in the request path, so anything but ASCII digits is rejected.
pub fn property_resource_name(property_id: &str) -> AnalyticsResult<String> {
    let id = property_id.trim();
    let id = id.strip_prefix("properties/").unwrap_or(id);
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AnalyticsError::InvalidPropertyId(property_id.to_string()));
    }
    Ok(format!("properties/{}", id))
}

/// Inclusive date range, in any expression the API accepts
/// (`YYYY-MM-DD`, `today`, `yesterday`, `NdaysAgo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// A historical report query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// Resource name, `properties/<id>`
    pub property: String,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
    pub date_range: DateRange,
    /// Exact-match value for the `eventName` dimension
    pub event_filter: Option<String>,
}

impl ReportRequest {
    /// Column names in the order rows are flattened: dimensions, then metrics
    pub fn header(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .chain(self.metrics.iter())
            .cloned()
            .collect()
    }
}

/// A real-time query (no date range, metrics only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeRequest {
    pub property: String,
    pub metrics: Vec<String>,
}

impl RealtimeRequest {
    pub fn header(&self) -> Vec<String> {
        self.metrics.clone()
    }
}

/// Flat tabular result returned to the caller
///
/// `header[i]` names the column found at `rows[*][i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
