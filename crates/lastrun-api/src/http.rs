use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use lastrun_prometheus::{ExporterMetrics, TEXT_FORMAT};

use crate::{ApiError, ServerError};

/// Default value of `--telemetry.endpoint`.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// HTTP exposition service builder.
pub struct HttpApi {
    metrics: ExporterMetrics,
}

impl HttpApi {
    /// Service exposing everything registered in `metrics`.
    ///
    /// # Examples
    /// ```
    /// use lastrun_api::{DEFAULT_METRICS_PATH, HttpApi};
    /// use lastrun_prometheus::ExporterMetrics;
    ///
    /// let metrics = ExporterMetrics::new("last_run_summary.yaml").unwrap();
    /// let router = HttpApi::new(metrics).router(DEFAULT_METRICS_PATH).unwrap();
    /// # let _ = router;
    /// ```
    pub fn new(metrics: ExporterMetrics) -> Self {
        Self { metrics }
    }

    /// Build the router.
    ///
    /// Routes:
    /// - GET `endpoint` - metrics in the text exposition format
    ///
    /// Everything else is answered by axum's fallback (404).
    pub fn router(self, endpoint: &str) -> Result<Router, ServerError> {
        validate_endpoint(endpoint)?;

        Ok(Router::new()
            .route(endpoint, get(metrics))
            .with_state(self.metrics))
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ServerError> {
    let valid = endpoint.starts_with('/') && !endpoint.contains(['{', '}', '*', ':']);
    if valid {
        Ok(())
    } else {
        Err(ServerError::InvalidEndpoint(endpoint.to_string()))
    }
}

/// GET /metrics
///
/// Gathering reads the summary file, so it runs on the blocking pool.
async fn metrics(State(metrics): State<ExporterMetrics>) -> Result<impl IntoResponse, ApiError> {
    let body = tokio::task::spawn_blocking(move || metrics.encode_text()).await??;

    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], body))
}
