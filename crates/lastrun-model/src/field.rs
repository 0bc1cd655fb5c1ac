use std::fmt;

/// One numeric field of the `resources` section.
///
/// Each variant ties together the YAML key it is read from, the metric it is
/// exported as, and the help text of that metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceField {
    Changed,
    CorrectiveChange,
    Failed,
    FailedToRestart,
    OutOfSync,
    Restarted,
    Scheduled,
    Skipped,
    Total,
}

impl ResourceField {
    /// Every field, in exposition order.
    pub const ALL: [ResourceField; 9] = [
        ResourceField::Changed,
        ResourceField::CorrectiveChange,
        ResourceField::Failed,
        ResourceField::FailedToRestart,
        ResourceField::OutOfSync,
        ResourceField::Restarted,
        ResourceField::Scheduled,
        ResourceField::Skipped,
        ResourceField::Total,
    ];

    /// Key under `resources:` in the summary file.
    #[inline]
    pub fn key(&self) -> &'static str {
        match self {
            ResourceField::Changed => "changed",
            ResourceField::CorrectiveChange => "corrective_change",
            ResourceField::Failed => "failed",
            ResourceField::FailedToRestart => "failed_to_restart",
            ResourceField::OutOfSync => "out_of_sync",
            ResourceField::Restarted => "restarted",
            ResourceField::Scheduled => "scheduled",
            ResourceField::Skipped => "skipped",
            ResourceField::Total => "total",
        }
    }

    /// Metric name without namespace (e.g. `ResourcesChanged`).
    #[inline]
    pub fn metric_name(&self) -> &'static str {
        match self {
            ResourceField::Changed => "ResourcesChanged",
            ResourceField::CorrectiveChange => "ResourcesCorrectiveChange",
            ResourceField::Failed => "ResourcesFailed",
            ResourceField::FailedToRestart => "ResourcesFailedToRestart",
            ResourceField::OutOfSync => "ResourcesOutOfSync",
            ResourceField::Restarted => "ResourcesRestarted",
            ResourceField::Scheduled => "ResourcesScheduled",
            ResourceField::Skipped => "ResourcesSkipped",
            ResourceField::Total => "ResourcesTotal",
        }
    }

    #[inline]
    pub fn help(&self) -> &'static str {
        match self {
            ResourceField::Changed => "Number of changed resources",
            ResourceField::CorrectiveChange => "Number of corrective changes",
            ResourceField::Failed => "Number of failed resources",
            ResourceField::FailedToRestart => "Number of resources that failed to restart",
            ResourceField::OutOfSync => "Number of out of sync resources",
            ResourceField::Restarted => "Number of restarted resources",
            ResourceField::Scheduled => "Number of scheduled resources",
            ResourceField::Skipped => "Number of skipped resources",
            ResourceField::Total => "Total number of resources",
        }
    }
}

impl fmt::Display for ResourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
