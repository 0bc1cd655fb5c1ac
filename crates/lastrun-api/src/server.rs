use std::net::{Ipv4Addr, Ipv6Addr};

use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::{ListenAddr, ServerError};

/// Bind the listener. Fails with [`ServerError::Bind`] when the address is
/// taken, not permitted, or does not resolve.
///
/// An unspecified host binds `[::]`, which also accepts IPv4 clients on
/// dual-stack systems, and retries on `0.0.0.0` if IPv6 is unavailable.
pub async fn bind(addr: &ListenAddr) -> Result<TcpListener, ServerError> {
    let bound = if addr.is_unspecified() {
        match TcpListener::bind((Ipv6Addr::UNSPECIFIED, addr.port())).await {
            Ok(listener) => Ok(listener),
            Err(err) => {
                debug!(error = %err, "ipv6 wildcard unavailable, binding ipv4 only");
                TcpListener::bind((Ipv4Addr::UNSPECIFIED, addr.port())).await
            }
        }
    } else {
        TcpListener::bind((addr.host(), addr.port())).await
    };

    bound.map_err(|source| ServerError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve `router` on an already bound listener until the process exits.
///
/// # Examples
/// ```no_run
/// # async fn example() -> Result<(), lastrun_api::ServerError> {
/// use lastrun_api::{HttpApi, ListenAddr, bind, serve};
/// use lastrun_prometheus::ExporterMetrics;
///
/// let metrics = ExporterMetrics::new("last_run_summary.yaml").expect("registry");
/// let router = HttpApi::new(metrics).router("/metrics")?;
/// let listener = bind(&ListenAddr::default()).await?;
/// serve(listener, router).await
/// # }
/// ```
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), ServerError> {
    axum::serve(listener, router)
        .await
        .map_err(ServerError::Serve)
}

/// Bind `addr`, then serve `router` on it.
pub async fn run(addr: &ListenAddr, router: Router) -> Result<(), ServerError> {
    let listener = bind(addr).await?;
    match listener.local_addr() {
        Ok(local) => info!(address = %local, "listening"),
        Err(_) => info!(address = %addr, "listening"),
    }

    serve(listener, router).await
}
