//! Analytics data API wire types
//!
//! Request bodies for `:runReport` / `:runRealtimeReport` and the subset of
//! the response the server reads. Unknown response fields are ignored.

use serde::{Deserialize, Serialize};

use crate::types::{DateRange, RealtimeRequest, ReportRequest, ReportTable, EVENT_NAME_DIMENSION};

#[derive(Debug, Clone, Serialize)]
pub struct FieldName {
    pub name: String,
}

fn field_names(names: &[String]) -> Vec<FieldName> {
    names
        .iter()
        .map(|name| FieldName { name: name.clone() })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    pub value: String,
    pub match_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    pub string_filter: StringFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterExpression {
    pub filter: Filter,
}

impl FilterExpression {
    /// `eventName == value`, case-sensitive exact match
    pub fn event_name_exact(value: &str) -> Self {
        Self {
            filter: Filter {
                field_name: EVENT_NAME_DIMENSION.to_string(),
                string_filter: StringFilter {
                    value: value.to_string(),
                    match_type: "EXACT",
                },
            },
        }
    }
}

/// Body of `POST /{property}:runReport`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportBody {
    pub date_ranges: Vec<DateRange>,
    pub dimensions: Vec<FieldName>,
    pub metrics: Vec<FieldName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
}

impl From<&ReportRequest> for RunReportBody {
    fn from(request: &ReportRequest) -> Self {
        Self {
            date_ranges: vec![request.date_range.clone()],
            dimensions: field_names(&request.dimensions),
            metrics: field_names(&request.metrics),
            dimension_filter: request
                .event_filter
                .as_deref()
                .map(FilterExpression::event_name_exact),
        }
    }
}

/// Body of `POST /{property}:runRealtimeReport`
#[derive(Debug, Clone, Serialize)]
pub struct RunRealtimeReportBody {
    pub metrics: Vec<FieldName>,
}

impl From<&RealtimeRequest> for RunRealtimeReportBody {
    fn from(request: &RealtimeRequest) -> Self {
        Self {
            metrics: field_names(&request.metrics),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CellValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<CellValue>,
    #[serde(default)]
    pub metric_values: Vec<CellValue>,
}

fn cells(values: Vec<CellValue>, width: usize) -> impl Iterator<Item = String> {
    values
        .into_iter()
        .map(|cell| cell.value.unwrap_or_default())
        .chain(std::iter::repeat(String::new()))
        .take(width)
}

impl Row {
    /// Dimension cells then metric cells
    ///
    /// Each group is cut or padded with `""` to the requested width, so a
    /// row the API returned without `dimensionValues` still lines up with
    /// the header.
    pub fn flatten(self, dimensions: usize, metrics: usize) -> Vec<String> {
        cells(self.dimension_values, dimensions)
            .chain(cells(self.metric_values, metrics))
            .collect()
    }
}

/// Response of both report endpoints
///
/// The API leaves `rows` out entirely when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl RunReportResponse {
    /// `header` lists the first `dimensions` columns as dimensions and the
    /// rest as metrics
    pub fn into_table(self, header: Vec<String>, dimensions: usize) -> ReportTable {
        let dimensions = dimensions.min(header.len());
        let metrics = header.len() - dimensions;
        ReportTable {
            rows: self
                .rows
                .into_iter()
                .map(|row| row.flatten(dimensions, metrics))
                .collect(),
            header,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pull a readable message out of a failed response body
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{}: {}", status, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(event_filter: Option<&str>) -> ReportRequest {
        ReportRequest {
            property: "properties/7".into(),
            dimensions: vec!["eventName".into()],
            metrics: vec!["keyEvents".into()],
            date_range: DateRange {
                start_date: "30daysAgo".into(),
                end_date: "today".into(),
            },
            event_filter: event_filter.map(String::from),
        }
    }

    #[test]
    fn test_run_report_body_shape() {
        let body = serde_json::to_value(RunReportBody::from(&request(Some("purchase")))).unwrap();
        assert_eq!(
            body,
            json!({
                "dateRanges": [{ "startDate": "30daysAgo", "endDate": "today" }],
                "dimensions": [{ "name": "eventName" }],
                "metrics": [{ "name": "keyEvents" }],
                "dimensionFilter": {
                    "filter": {
                        "fieldName": "eventName",
                        "stringFilter": { "value": "purchase", "matchType": "EXACT" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_run_report_body_omits_absent_filter() {
        let body = serde_json::to_value(RunReportBody::from(&request(None))).unwrap();
        assert!(body.get("dimensionFilter").is_none());
    }

    #[test]
    fn test_realtime_body_has_only_metrics() {
        let body = serde_json::to_value(RunRealtimeReportBody::from(&RealtimeRequest {
            property: "properties/7".into(),
            metrics: vec!["activeUsers".into()],
        }))
        .unwrap();
        assert_eq!(body, json!({ "metrics": [{ "name": "activeUsers" }] }));
    }

    #[test]
    fn test_response_without_rows_is_empty_table() {
        let response: RunReportResponse =
            serde_json::from_value(json!({ "kind": "analyticsData#runReport" })).unwrap();
        let table = response.into_table(vec!["sessions".into()], 0);
        assert_eq!(table.header, vec!["sessions"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_rows_flatten_dimensions_before_metrics() {
        let response: RunReportResponse = serde_json::from_value(json!({
            "rows": [
                {
                    "dimensionValues": [{ "value": "Germany" }, { "value": "Berlin" }],
                    "metricValues": [{ "value": "1200" }, { "value": "0.5" }]
                },
                {
                    "dimensionValues": [{ "value": "France" }, {}],
                    "metricValues": [{ "value": "7" }, { "value": "1" }]
                }
            ]
        }))
        .unwrap();
        let table = response.into_table(
            vec![
                "country".into(),
                "city".into(),
                "totalUsers".into(),
                "bounceRate".into(),
            ],
            2,
        );
        assert_eq!(
            table.rows,
            vec![
                vec!["Germany", "Berlin", "1200", "0.5"],
                vec!["France", "", "7", "1"],
            ]
        );
    }

    #[test]
    fn test_short_rows_are_padded_to_header_width() {
        let response: RunReportResponse = serde_json::from_value(json!({
            "rows": [
                { "metricValues": [{ "value": "9" }, { "value": "4" }] },
                { "dimensionValues": [{ "value": "US" }], "metricValues": [{ "value": "3" }] }
            ]
        }))
        .unwrap();
        let table = response.into_table(
            vec![
                "country".into(),
                "city".into(),
                "sessions".into(),
                "totalUsers".into(),
            ],
            2,
        );
        assert_eq!(
            table.rows,
            vec![vec!["", "", "9", "4"], vec!["US", "", "3", ""]]
        );
        assert!(table.rows.iter().all(|row| row.len() == table.header.len()));
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"code":400,"message":"Field foo is not a valid dimension.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_message(body),
            "INVALID_ARGUMENT: Field foo is not a valid dimension."
        );
        assert_eq!(error_message("upstream timeout\n"), "upstream timeout");
        assert_eq!(error_message(""), "empty response body");
    }
}
