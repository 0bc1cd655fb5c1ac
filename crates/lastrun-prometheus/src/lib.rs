//! Prometheus side of the Puppet last-run exporter.
//!
//! [`ResourceCollector`] re-reads `last_run_summary.yaml` on every gather and
//! turns its `resources` section into nine gauges. [`ExporterMetrics`] wires
//! it into a private [`Registry`] next to the static build-info gauge.
//!
//! ## Example
//! ```rust,no_run
//! use lastrun_prometheus::ExporterMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = ExporterMetrics::new("last_run_summary.yaml")?;
//! let body = metrics.encode_text()?;
//! print!("{body}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `puppet_last_run_exporter_Resources*` - Gauge per `resources:` key
//! - `puppet_last_run_exporter_build_info{version, revision, branch, rustversion}` - Gauge, always `1`

mod build_info;
pub use build_info::BuildInfo;

mod collector;
pub use collector::ResourceCollector;

mod exporter;
pub use exporter::ExporterMetrics;

pub use prometheus::{Encoder, Error, Registry, TEXT_FORMAT, TextEncoder};

/// Prefix shared by every exported metric.
pub const NAMESPACE: &str = "puppet_last_run_exporter";
