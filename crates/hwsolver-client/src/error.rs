//! Internal error types for the solver client.
//!
//! These errors stay inside `hwsolver-client` and are mapped to
//! `TransportError` at the port boundary.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the solver service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("Solver request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network, timeout or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body was not the expected JSON.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
