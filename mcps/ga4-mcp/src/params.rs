//! Parameter types for GA4 MCP tools
//!
//! Field names follow the data API's camelCase convention (`propertyId`,
//! `startDate`, ...). Anything optional is defaulted by the handlers.

use mcp_common::{invalid_params, McpError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `query_analytics` / `get_custom_report`
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    #[schemars(description = "GA4 property id (defaults to GA_PROPERTY_ID)")]
    pub property_id: Option<String>,
    #[schemars(description = "Dimension names, e.g. [\"country\", \"pagePath\"]")]
    pub dimensions: Option<Vec<String>>,
    #[schemars(description = "Metric names, e.g. [\"sessions\", \"activeUsers\"] (at least one)")]
    pub metrics: Vec<String>,
    #[schemars(description = "Start date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: 30daysAgo)")]
    pub start_date: Option<String>,
    #[schemars(description = "End date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: today)")]
    pub end_date: Option<String>,
}

impl ReportParams {
    pub fn validate(&self) -> Result<(), McpError> {
        if self.metrics.is_empty() {
            return Err(invalid_params("metrics must contain at least one metric name"));
        }
        if self.metrics.iter().any(|m| m.trim().is_empty()) {
            return Err(invalid_params("metric names must not be empty"));
        }
        if let Some(dimensions) = &self.dimensions {
            if dimensions.iter().any(|d| d.trim().is_empty()) {
                return Err(invalid_params("dimension names must not be empty"));
            }
        }
        Ok(())
    }
}

/// `get_realtime_data`
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeParams {
    #[schemars(description = "GA4 property id (defaults to GA_PROPERTY_ID)")]
    pub property_id: Option<String>,
    #[schemars(description = "Real-time metric names (default: [\"activeUsers\"])")]
    pub metrics: Option<Vec<String>>,
}

impl RealtimeParams {
    /// An empty list falls back to the default metric; blank names do not
    pub fn validate(&self) -> Result<(), McpError> {
        if let Some(metrics) = &self.metrics {
            if metrics.iter().any(|m| m.trim().is_empty()) {
                return Err(invalid_params("metric names must not be empty"));
            }
        }
        Ok(())
    }
}

/// Canned reports: traffic sources, demographics, page performance
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    #[schemars(description = "GA4 property id (defaults to GA_PROPERTY_ID)")]
    pub property_id: Option<String>,
    #[schemars(description = "Start date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: 30daysAgo)")]
    pub start_date: Option<String>,
    #[schemars(description = "End date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: today)")]
    pub end_date: Option<String>,
}

/// `get_key_event_data`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyEventParams {
    #[schemars(description = "Event name to report on, matched exactly (e.g. \"purchase\")")]
    pub key_event: String,
    #[schemars(description = "GA4 property id (defaults to GA_PROPERTY_ID)")]
    pub property_id: Option<String>,
    #[schemars(description = "Start date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: 30daysAgo)")]
    pub start_date: Option<String>,
    #[schemars(description = "End date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: today)")]
    pub end_date: Option<String>,
}

/// `get_conversion_data`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionParams {
    #[schemars(description = "Conversion event name, matched exactly (e.g. \"sign_up\")")]
    pub conversion_event: String,
    #[schemars(description = "GA4 property id (defaults to GA_PROPERTY_ID)")]
    pub property_id: Option<String>,
    #[schemars(description = "Start date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: 30daysAgo)")]
    pub start_date: Option<String>,
    #[schemars(description = "End date: YYYY-MM-DD, today, yesterday or NdaysAgo (default: today)")]
    pub end_date: Option<String>,
}

/// Event name plus the shared date/property arguments
///
/// Both event tools reduce to this before reaching the handler.
#[derive(Debug, Clone)]
pub struct EventParams {
    pub event: String,
    pub range: DateRangeParams,
}

impl EventParams {
    pub fn validate(&self) -> Result<(), McpError> {
        if self.event.trim().is_empty() {
            return Err(invalid_params("event name must not be empty"));
        }
        Ok(())
    }
}

impl From<KeyEventParams> for EventParams {
    fn from(params: KeyEventParams) -> Self {
        Self {
            event: params.key_event,
            range: DateRangeParams {
                property_id: params.property_id,
                start_date: params.start_date,
                end_date: params.end_date,
            },
        }
    }
}

impl From<ConversionParams> for EventParams {
    fn from(params: ConversionParams) -> Self {
        Self {
            event: params.conversion_event,
            range: DateRangeParams {
                property_id: params.property_id,
                start_date: params.start_date,
                end_date: params.end_date,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_params_camel_case() {
        let params: ReportParams = serde_json::from_value(json!({
            "propertyId": "123",
            "dimensions": ["country"],
            "metrics": ["sessions"],
            "startDate": "7daysAgo"
        }))
        .unwrap();
        assert_eq!(params.property_id.as_deref(), Some("123"));
        assert_eq!(params.start_date.as_deref(), Some("7daysAgo"));
        assert!(params.end_date.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_report_params_require_metrics() {
        assert!(serde_json::from_value::<ReportParams>(json!({})).is_err());

        let empty: ReportParams = serde_json::from_value(json!({ "metrics": [] })).unwrap();
        assert!(empty.validate().is_err());

        let blank: ReportParams = serde_json::from_value(json!({ "metrics": [" "] })).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_realtime_params_all_optional() {
        let params: RealtimeParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.property_id.is_none());
        assert!(params.metrics.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_realtime_params_reject_blank_metric() {
        let blank: RealtimeParams =
            serde_json::from_value(json!({ "metrics": ["", "activeUsers"] })).unwrap();
        assert!(blank.validate().is_err());

        let empty: RealtimeParams = serde_json::from_value(json!({ "metrics": [] })).unwrap();
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_event_params_from_both_variants() {
        let key: KeyEventParams =
            serde_json::from_value(json!({ "keyEvent": "purchase", "endDate": "yesterday" }))
                .unwrap();
        let event = EventParams::from(key);
        assert_eq!(event.event, "purchase");
        assert_eq!(event.range.end_date.as_deref(), Some("yesterday"));

        let conversion: ConversionParams =
            serde_json::from_value(json!({ "conversionEvent": "sign_up" })).unwrap();
        assert_eq!(EventParams::from(conversion).event, "sign_up");

        assert!(serde_json::from_value::<KeyEventParams>(json!({})).is_err());
    }

    #[test]
    fn test_event_params_reject_blank_event() {
        let event = EventParams {
            event: "  ".into(),
            range: DateRangeParams::default(),
        };
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_schema_marks_metrics_required() {
        let schema = serde_json::to_value(schemars::schema_for!(ReportParams)).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "metrics"));
        assert!(!required.iter().any(|v| v == "propertyId"));
    }
}
