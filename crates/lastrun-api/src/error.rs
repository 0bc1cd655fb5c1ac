use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Startup and accept-loop failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {addr:?}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("invalid metrics endpoint {0:?}: must start with '/' and contain no route wildcards")]
    InvalidEndpoint(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

/// Failures while answering a scrape.
///
/// A missing or malformed report is not one of them: the collector logs it
/// and the response simply lacks the resource gauges.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] lastrun_prometheus::Error),

    #[error("scrape task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "scrape request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
