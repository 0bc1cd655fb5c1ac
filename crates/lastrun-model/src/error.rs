use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("status report {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("status report {origin} is malformed: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ReportError {
    /// Short label for logs (`unavailable` / `malformed`).
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ReportError::Unavailable { .. } => "unavailable",
            ReportError::Malformed { .. } => "malformed",
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
