use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use prometheus::{Registry, TextEncoder, proto::MetricFamily};

use crate::{BuildInfo, ResourceCollector};

/// Registry holding everything the exporter serves.
///
/// Each instance owns its own [`Registry`], so several exporters pointed at
/// different summary files can live in one process.
///
/// Besides the resource gauges the registry carries `build_info` and, on
/// Linux, the standard `process_*` metrics of the exporter itself.
#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Arc<Registry>,
    report_path: PathBuf,
}

impl ExporterMetrics {
    /// Create an exporter for the summary at `report_path` with a fresh registry.
    pub fn new(report_path: impl Into<PathBuf>) -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()), report_path)
    }

    /// Create an exporter registering its collectors into `registry`.
    pub fn new_with_registry(
        registry: Arc<Registry>,
        report_path: impl Into<PathBuf>,
    ) -> Result<Self, prometheus::Error> {
        let report_path = report_path.into();

        registry.register(Box::new(BuildInfo::current().gauge()?))?;
        registry.register(Box::new(ResourceCollector::new(report_path.clone())?))?;
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            report_path,
        })
    }

    /// Gather all metric families. Reads the summary file.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Gather and render in the text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.gather())
    }

    /// Underlying registry, for callers adding their own collectors.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Summary file the resource collector reads.
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }
}
