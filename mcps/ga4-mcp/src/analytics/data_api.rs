//! Google Analytics Data API backend
//!
//! Implements [`AnalyticsBackend`] over the REST surface of the data API.
//! See: https://developers.google.com/analytics/devguides/reporting/data/v1/rest

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::credentials::AccessTokenSource;
use super::error::{AnalyticsError, AnalyticsResult};
use super::wire::{error_message, RunRealtimeReportBody, RunReportBody, RunReportResponse};
use super::AnalyticsBackend;
use crate::config::AnalyticsConfig;
use crate::types::{RealtimeRequest, ReportRequest};

/// HTTP backend for the analytics data API
pub struct DataApiBackend {
    client: Client,
    base_url: String,
    credentials: AccessTokenSource,
}

impl DataApiBackend {
    pub fn new(base_url: impl Into<String>, credentials: AccessTokenSource) -> AnalyticsResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("ga4-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config(config: &AnalyticsConfig) -> AnalyticsResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            AccessTokenSource::from_config(config),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{property}:{method}`
    fn endpoint(&self, property: &str, method: &str) -> String {
        format!("{}/{}:{}", self.base_url, property, method)
    }

    #[instrument(skip(self, body), fields(url = %self.endpoint(property, method)))]
    async fn post<B: Serialize + Sync>(
        &self,
        property: &str,
        method: &str,
        body: &B,
    ) -> AnalyticsResult<RunReportResponse> {
        let token = self.credentials.access_token().await?;

        debug!("sending report request");
        let response = self
            .client
            .post(self.endpoint(property, method))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            warn!(status = status.as_u16(), message = %message, "data API returned an error");
            return Err(AnalyticsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl AnalyticsBackend for DataApiBackend {
    fn name(&self) -> &str {
        "analytics-data-api"
    }

    async fn run_report(&self, request: &ReportRequest) -> AnalyticsResult<RunReportResponse> {
        self.post(&request.property, "runReport", &RunReportBody::from(request))
            .await
    }

    async fn run_realtime_report(
        &self,
        request: &RealtimeRequest,
    ) -> AnalyticsResult<RunReportResponse> {
        self.post(
            &request.property,
            "runRealtimeReport",
            &RunRealtimeReportBody::from(request),
        )
        .await
    }
}
