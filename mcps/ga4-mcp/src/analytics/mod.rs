//! Analytics backends
//!
//! [`AnalyticsBackend`] is the seam between the report tools and the remote
//! data API. Each call is exactly one remote query: no retries, no paging.

use async_trait::async_trait;

use crate::types::{RealtimeRequest, ReportRequest};

pub mod credentials;
pub mod data_api;
pub mod error;
pub mod wire;

pub use credentials::AccessTokenSource;
pub use data_api::DataApiBackend;
pub use error::{AnalyticsError, AnalyticsResult};
pub use wire::RunReportResponse;

/// A source of tabular analytics reports
#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &str;

    /// Run a historical report
    async fn run_report(&self, request: &ReportRequest) -> AnalyticsResult<RunReportResponse>;

    /// Run a real-time report
    async fn run_realtime_report(
        &self,
        request: &RealtimeRequest,
    ) -> AnalyticsResult<RunReportResponse>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory backend that records what it was asked

    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    pub struct FakeBackend {
        response: serde_json::Value,
        failure: Option<String>,
        pub reports: Mutex<Vec<ReportRequest>>,
        pub realtime: Mutex<Vec<RealtimeRequest>>,
    }

    impl FakeBackend {
        /// Answer every call with these rows (dimension cells, metric cells)
        pub fn with_rows(rows: &[(Vec<&str>, Vec<&str>)]) -> Self {
            let rows: Vec<_> = rows
                .iter()
                .map(|(dims, mets)| {
                    json!({
                        "dimensionValues": dims.iter().map(|v| json!({ "value": v })).collect::<Vec<_>>(),
                        "metricValues": mets.iter().map(|v| json!({ "value": v })).collect::<Vec<_>>(),
                    })
                })
                .collect();
            Self {
                response: json!({ "rows": rows }),
                ..Self::default()
            }
        }

        /// Fail every call with an API error carrying `message`
        pub fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn last_report(&self) -> ReportRequest {
            self.reports.lock().unwrap().last().cloned().unwrap()
        }

        pub fn last_realtime(&self) -> RealtimeRequest {
            self.realtime.lock().unwrap().last().cloned().unwrap()
        }

        pub fn calls(&self) -> usize {
            self.reports.lock().unwrap().len() + self.realtime.lock().unwrap().len()
        }

        fn answer(&self) -> AnalyticsResult<RunReportResponse> {
            match &self.failure {
                Some(message) => Err(AnalyticsError::Api {
                    status: 400,
                    message: message.clone(),
                }),
                None => Ok(serde_json::from_value(self.response.clone())?),
            }
        }
    }

    #[async_trait]
    impl AnalyticsBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        async fn run_report(&self, request: &ReportRequest) -> AnalyticsResult<RunReportResponse> {
            self.reports.lock().unwrap().push(request.clone());
            self.answer()
        }

        async fn run_realtime_report(
            &self,
            request: &RealtimeRequest,
        ) -> AnalyticsResult<RunReportResponse> {
            self.realtime.lock().unwrap().push(request.clone());
            self.answer()
        }
    }
}
