use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_yaml::Value;

use crate::ResourceField;

/// `version:` section.
///
/// Puppet writes `config` as whatever the catalog version is (usually an
/// epoch integer), so any scalar is accepted and kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    #[serde(deserialize_with = "scalar_as_string")]
    pub config: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub puppet: Option<String>,
}

/// `resources:` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub changed: f64,
    pub corrective_change: f64,
    pub failed: f64,
    pub failed_to_restart: f64,
    pub out_of_sync: f64,
    pub restarted: f64,
    pub scheduled: f64,
    pub skipped: f64,
    pub total: f64,
}

impl Resources {
    /// Value of a single field.
    ///
    /// # Examples
    /// ```
    /// use lastrun_model::{ResourceField, StatusReport};
    ///
    /// let report = StatusReport::from_yaml_str("resources:\n  failed: 2\n").unwrap();
    /// assert_eq!(report.resources.value(ResourceField::Failed), 2.0);
    /// assert_eq!(report.resources.value(ResourceField::Total), 0.0);
    /// ```
    pub fn value(&self, field: ResourceField) -> f64 {
        match field {
            ResourceField::Changed => self.changed,
            ResourceField::CorrectiveChange => self.corrective_change,
            ResourceField::Failed => self.failed,
            ResourceField::FailedToRestart => self.failed_to_restart,
            ResourceField::OutOfSync => self.out_of_sync,
            ResourceField::Restarted => self.restarted,
            ResourceField::Scheduled => self.scheduled,
            ResourceField::Skipped => self.skipped,
            ResourceField::Total => self.total,
        }
    }

    /// All fields paired with their values, in [`ResourceField::ALL`] order.
    pub fn samples(&self) -> Vec<(ResourceField, f64)> {
        ResourceField::ALL
            .iter()
            .map(|&field| (field, self.value(field)))
            .collect()
    }
}

/// `time:` section.
///
/// Puppet emits one duration per resource type it managed, plus `total`,
/// `config_retrieval`, `last_run` and friends, so the key set is open.
/// Values are kept as raw YAML: an entry that is not a number reads as
/// absent instead of failing the whole summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(pub BTreeMap<String, Value>);

impl Time {
    /// Duration of `phase` in seconds, `None` when missing or not numeric.
    ///
    /// # Examples
    /// ```
    /// use lastrun_model::StatusReport;
    ///
    /// let report = StatusReport::from_yaml_str("time:\n  file: 0.5\n  note: n/a\n").unwrap();
    /// assert_eq!(report.time.get("file"), Some(0.5));
    /// assert_eq!(report.time.get("note"), None);
    /// ```
    pub fn get(&self, phase: &str) -> Option<f64> {
        self.0.get(phase).and_then(Value::as_f64)
    }

    /// Total run duration in seconds.
    pub fn total(&self) -> Option<f64> {
        self.get("total")
    }

    /// Unix timestamp of the run.
    pub fn last_run(&self) -> Option<f64> {
        self.get("last_run")
    }

    /// Numeric phases in key order. Non-numeric entries are skipped.
    ///
    /// # Examples
    /// ```
    /// use lastrun_model::StatusReport;
    ///
    /// let report =
    ///     StatusReport::from_yaml_str("time:\n  total: 9.5\n  file: 2\n  note: n/a\n").unwrap();
    /// let phases: Vec<_> = report.time.iter().collect();
    /// assert_eq!(phases, [("file", 2.0), ("total", 9.5)]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_f64().map(|v| (k.as_str(), v)))
    }
}

/// `changes:` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Changes {
    pub total: f64,
}

/// `events:` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Events {
    pub failure: f64,
    pub success: f64,
    pub total: f64,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a scalar version, found {other:?}"
        ))),
    }
}
