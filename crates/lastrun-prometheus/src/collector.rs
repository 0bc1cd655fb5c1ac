use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use prometheus::{
    Gauge, Opts,
    core::{Collector, Desc},
    proto::MetricFamily,
};
use tracing::{debug, error};

use lastrun_model::{ReportResult, ResourceField, Resources, StatusReport};

use crate::NAMESPACE;

/// Collector exporting the `resources` section of Puppet's last run summary.
///
/// Every [`Collector::collect`] call re-reads the summary from disk. Calls are
/// serialized: the lock is held across read, parse and emit, so a single
/// gather never mixes values from two versions of the file.
///
/// ## Metrics
/// - `puppet_last_run_exporter_ResourcesChanged`
/// - `puppet_last_run_exporter_ResourcesCorrectiveChange`
/// - `puppet_last_run_exporter_ResourcesFailed`
/// - `puppet_last_run_exporter_ResourcesFailedToRestart`
/// - `puppet_last_run_exporter_ResourcesOutOfSync`
/// - `puppet_last_run_exporter_ResourcesRestarted`
/// - `puppet_last_run_exporter_ResourcesScheduled`
/// - `puppet_last_run_exporter_ResourcesSkipped`
/// - `puppet_last_run_exporter_ResourcesTotal`
///
/// A summary that is missing or does not parse is logged and yields no
/// families for that gather.
pub struct ResourceCollector {
    path: PathBuf,
    gauges: Vec<(ResourceField, Gauge)>,
    scrape_lock: Mutex<()>,
}

impl ResourceCollector {
    /// Create a collector reading the summary at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, prometheus::Error> {
        let gauges = ResourceField::ALL
            .iter()
            .map(|&field| {
                let opts = Opts::new(field.metric_name(), field.help()).namespace(NAMESPACE);
                Gauge::with_opts(opts).map(|gauge| (field, gauge))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.into(),
            gauges,
            scrape_lock: Mutex::new(()),
        })
    }

    /// Summary file this collector reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Descriptors of the nine resource gauges, in [`ResourceField::ALL`] order.
    pub fn describe(&self) -> Vec<&Desc> {
        self.gauges.iter().flat_map(|(_, gauge)| gauge.desc()).collect()
    }

    /// Read the summary once and return one sample per resource field.
    pub fn scrape(&self) -> ReportResult<Vec<(ResourceField, f64)>> {
        self.with_resources(Resources::samples)
    }

    /// Load the summary and hand its resources to `emit`, all under the scrape lock.
    fn with_resources<T>(&self, emit: impl FnOnce(&Resources) -> T) -> ReportResult<T> {
        let _guard = self.lock();
        let report = StatusReport::load(&self.path)?;
        Ok(emit(&report.resources))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded section holds no data, a panic inside it leaves nothing half-written.
        self.scrape_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Collector for ResourceCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.describe()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let collected = self.with_resources(|resources| {
            let mut families = Vec::with_capacity(self.gauges.len());
            for (field, gauge) in &self.gauges {
                gauge.set(resources.value(*field));
                families.extend(gauge.collect());
            }
            (families, resources.total)
        });

        match collected {
            Ok((families, total)) => {
                debug!(path = %self.path.display(), total, "scraped puppet last run report");
                families
            }
            Err(err) => {
                error!(
                    path = %self.path.display(),
                    kind = err.as_label(),
                    error = %err,
                    "error scraping puppet last run report"
                );
                Vec::new()
            }
        }
    }
}
