//! HTTP exposition of the exporter's metrics.
//!
//! - [`HttpApi`] builds the axum router serving the text exposition format.
//! - [`ListenAddr`] parses `--telemetry.address` values such as `:9309`.
//! - [`bind`] and [`serve`] run the listener.

mod addr;
pub use addr::ListenAddr;

mod error;
pub use error::{ApiError, ServerError};

mod http;
pub use http::{DEFAULT_METRICS_PATH, HttpApi};

mod server;
pub use server::{bind, run, serve};
