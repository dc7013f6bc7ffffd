//! Error types for analytics backend calls

use thiserror::Error;

/// Errors that can occur while running a report
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// No property id in the call and none configured
    #[error("no property id given and GA_PROPERTY_ID is not set")]
    MissingPropertyId,

    /// Property id that is not a plain numeric id
    #[error("invalid property id '{0}': expected digits such as 123456789 or properties/123456789")]
    InvalidPropertyId(String),

    /// The data API answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the API error envelope, or the raw body
        message: String,
    },

    /// Transport failure talking to the data API
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected shape
    #[error("failed to decode report response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The credential helper ran but did not produce a token
    #[error("could not obtain access token: {0}")]
    Credentials(String),

    /// The credential helper binary is missing
    #[error("credential helper '{0}' not found - install the Google Cloud CLI or set GA_ACCESS_TOKEN")]
    CredentialHelperNotFound(String),
}

/// Result type alias for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
