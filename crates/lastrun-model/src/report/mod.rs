use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

mod sections;
pub use sections::{Changes, Events, Resources, Time, Version};

/// Where Puppet's agent leaves the summary when run from its state directory.
pub const DEFAULT_REPORT_PATH: &str = "last_run_summary.yaml";

/// Parsed `last_run_summary.yaml`.
///
/// Missing sections and fields read as zero, unknown keys are ignored.
/// Only `resources` is exported; the other sections are kept so that a
/// complete summary always parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusReport {
    pub version: Version,
    pub resources: Resources,
    pub time: Time,
    pub changes: Changes,
    pub events: Events,
}

impl StatusReport {
    /// Parse a summary held in memory.
    pub fn from_yaml_str(input: &str) -> ReportResult<Self> {
        Self::parse(input, "<memory>")
    }

    /// Read and parse the summary at `path`.
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ReportError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, &path.display().to_string())
    }

    fn parse(input: &str, origin: &str) -> ReportResult<Self> {
        serde_yaml::from_str(input).map_err(|source| ReportError::Malformed {
            origin: origin.to_string(),
            source,
        })
    }
}
