//! Typed model of Puppet's `last_run_summary.yaml`.
//!
//! The summary is read fresh on every scrape and dropped right after its
//! values are emitted. [`ResourceField`] is the mapping table between the
//! YAML keys of the `resources` section and the exported gauges.

mod error;
pub use error::{ReportError, ReportResult};

mod field;
pub use field::ResourceField;

mod report;
pub use report::{Changes, DEFAULT_REPORT_PATH, Events, Resources, StatusReport, Time, Version};
